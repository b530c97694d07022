use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::Pattern;
use worldmap_tools::{decode_frame_json, format_decode_pretty, inspect_frame, InspectReport};

#[derive(Parser)]
#[command(
    name = "worldmap-tools",
    version,
    about = "World map frame inspection and decoding tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect frame structure and sizes.
    Inspect {
        /// Path to a captured frame, or a directory of frames.
        frame_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected frames.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected frames (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode a frame into structured output.
    Decode {
        /// Path to the frame bytes.
        frame_file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let limits = wire::Limits::default();
    match cli.command {
        Command::Inspect {
            frame_path,
            glob,
            sort,
            limit,
        } => {
            if frame_path.is_dir() {
                let entries = collect_frame_entries(&frame_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                log::debug!("inspecting {} frames", entries.len());
                for entry in entries {
                    let bytes = fs::read(&entry.path)
                        .with_context(|| format!("read frame {}", entry.path.display()))?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    match inspect_frame(&bytes, &limits) {
                        Ok(report) => print_inspect_report(&report),
                        Err(err) => println!("error: {err:#}"),
                    }
                }
            } else {
                let bytes = fs::read(&frame_path)
                    .with_context(|| format!("read frame {}", frame_path.display()))?;
                let report = inspect_frame(&bytes, &limits)?;
                print_inspect_report(&report);
            }
        }
        Command::Decode { frame_file, format } => {
            let bytes = fs::read(&frame_file)
                .with_context(|| format!("read frame {}", frame_file.display()))?;
            let output = decode_frame_json(&bytes, &limits)?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&output));
                }
            }
        }
    }
    Ok(())
}

struct FrameEntry {
    path: PathBuf,
    size: u64,
}

fn collect_frame_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<FrameEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(FrameEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(mut entries: Vec<FrameEntry>, sort: Option<InspectSort>) -> Vec<FrameEntry> {
    if let Some(InspectSort::Size) = sort {
        entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    }
    entries
}

fn print_inspect_report(report: &InspectReport) {
    let header = report.header;
    println!(
        "version: {} tag: {} payload_len: {} bytes frame_len: {} bytes",
        header.version, header.tag, header.payload_len, report.frame_len
    );
    println!("flags: 0x{:08x}", report.flags);
    if report.flags & wire::NONEXISTENT_FLAG != 0 {
        println!("includes nonexistent regions");
    }
    if let Some(count) = report.block_count {
        println!("blocks: {count}");
    }
}
