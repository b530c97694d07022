//! Configurable limits for bounded decoding.

/// Wire-level limits for frame decoding and encoding.
///
/// These limits are enforced before any repeated block is iterated or any
/// string is copied, so a hostile frame cannot force large allocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum frame size in bytes, header included.
    pub max_frame_bytes: usize,

    /// Maximum number of repeated blocks in one message.
    pub max_blocks: usize,

    /// Maximum length of a single string field in bytes.
    pub max_string_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_frame_bytes: 64 * 1024,

            // A full map sweep is requested in chunks well under this.
            max_blocks: 256,
            max_string_bytes: 255,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_frame_bytes: 4096,
            max_blocks: 16,
            max_string_bytes: 64,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_frame_bytes: usize::MAX,
            max_blocks: usize::MAX,
            max_string_bytes: usize::MAX,
        }
    }
}
