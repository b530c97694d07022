//! Single-slot tracker for the in-flight name or handle resolution.
//!
//! At most one resolution is pending. Arming again replaces it without
//! invoking the replaced callback, so only the most recently armed request
//! can ever be satisfied. There is no timeout.

use std::fmt;

use wire::Uuid;

use crate::coords::WorldHandle;

/// What the caller learns when a pending resolution matches a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRegion {
    pub handle: WorldHandle,
    pub url: String,
    pub image_id: Uuid,
    /// Whether the caller asked to travel as soon as the region resolved.
    pub teleport: bool,
}

/// Callback fired at most once when a pending resolution matches.
pub type ResolutionCallback = Box<dyn FnOnce(ResolvedRegion)>;

/// Region a pending resolution is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionTarget {
    /// Matched case-insensitively against region names.
    Name(String),
    /// Matched exactly against region handles.
    Handle(WorldHandle),
}

impl ResolutionTarget {
    /// Returns `true` if a region with this name and handle satisfies the target.
    #[must_use]
    pub fn matches(&self, name: &str, handle: WorldHandle) -> bool {
        match self {
            Self::Name(target) => eq_ignore_case(target, name),
            Self::Handle(target) => *target == handle,
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

struct PendingResolution {
    target: ResolutionTarget,
    callback: ResolutionCallback,
    url: String,
    teleport: bool,
}

impl fmt::Debug for PendingResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingResolution")
            .field("target", &self.target)
            .field("url", &self.url)
            .field("teleport", &self.teleport)
            .finish_non_exhaustive()
    }
}

/// Idle when empty, armed when holding a pending resolution.
#[derive(Debug, Default)]
pub struct ResolutionTracker {
    pending: Option<PendingResolution>,
}

impl ResolutionTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Target of the pending resolution, if armed.
    #[must_use]
    pub fn target(&self) -> Option<&ResolutionTarget> {
        self.pending.as_ref().map(|pending| &pending.target)
    }

    /// Arms the tracker, dropping any previous pending resolution unfired.
    ///
    /// Only the client calls this, immediately before sending the request
    /// the resolution waits for.
    pub(crate) fn arm(
        &mut self,
        target: ResolutionTarget,
        callback: ResolutionCallback,
        url: String,
        teleport: bool,
    ) {
        if let Some(previous) = self.pending.as_ref() {
            log::debug!(
                "superseding pending resolution for {:?} with {target:?}",
                previous.target
            );
        }
        self.pending = Some(PendingResolution {
            target,
            callback,
            url,
            teleport,
        });
    }

    /// Takes the pending resolution out if a region with `name` and `handle`
    /// satisfies it, leaving the tracker idle.
    ///
    /// The caller invokes the returned callback; the tracker is already idle
    /// by then, so a second match in the same reply finds nothing.
    pub(crate) fn take_match(
        &mut self,
        name: &str,
        handle: WorldHandle,
        image_id: Uuid,
    ) -> Option<(ResolutionCallback, ResolvedRegion)> {
        let matched = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.target.matches(name, handle));
        if !matched {
            return None;
        }
        let pending = self.pending.take()?;
        Some((
            pending.callback,
            ResolvedRegion {
                handle,
                url: pending.url,
                image_id,
                teleport: pending.teleport,
            },
        ))
    }
}
