//! Cache command - inspect cached artifacts
//!
//! Reporting only: entries are never evicted from here.

use crate::cache::{metadata_path, EntryMetadata};
use crate::cli::args::{CacheArgs, OutputFormat};
use crate::config;
use crate::error::{QescopeError, QescopeResult};
use console::style;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// One content entry in the cache root
#[derive(Debug, Serialize)]
struct CacheEntryInfo {
    name: String,
    size_bytes: u64,
    url: Option<String>,
    etag: Option<String>,
}

/// Format bytes as human-readable size (e.g., "1.5 GB")
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn is_sidecar(name: &str) -> bool {
    name.ends_with(".json") || name.ends_with(".lock") || name.ends_with(".incomplete")
}

/// Collect content entries (skipping sidecars and extraction dirs)
fn scan_entries(cache_root: &Path) -> QescopeResult<Vec<CacheEntryInfo>> {
    let mut entries = Vec::new();
    let dir = fs::read_dir(cache_root)
        .map_err(|e| QescopeError::io(format!("listing cache root {}", cache_root.display()), e))?;

    for entry in dir {
        let entry = entry.map_err(|e| QescopeError::io("reading cache root entry", e))?;
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_sidecar(&name) {
            continue;
        }

        let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
        let meta: Option<EntryMetadata> = fs::read(metadata_path(&entry.path()))
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok());

        entries.push(CacheEntryInfo {
            name,
            size_bytes,
            url: meta.as_ref().map(|m| m.url.clone()),
            etag: meta.map(|m| m.etag),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Execute the cache command
pub fn execute(args: CacheArgs) -> QescopeResult<()> {
    let cache_root: PathBuf = args
        .cache_root
        .unwrap_or_else(config::default_cache_root);

    if !cache_root.exists() {
        println!("Cache root {} does not exist yet.", cache_root.display());
        return Ok(());
    }

    let entries = scan_entries(&cache_root)?;

    match args.format {
        OutputFormat::Table => {
            println!("Cache root: {}", cache_root.display());
            println!();
            if entries.is_empty() {
                println!("No cached artifacts.");
                return Ok(());
            }

            println!("{:<18} {:>10} URL", "ENTRY", "SIZE");
            println!("{}", "-".repeat(72));
            let mut total = 0u64;
            for entry in &entries {
                let short = if entry.name.len() > 16 {
                    format!("{}…", &entry.name[..15])
                } else {
                    entry.name.clone()
                };
                println!(
                    "{:<18} {:>10} {}",
                    short,
                    format_bytes(entry.size_bytes),
                    entry.url.as_deref().unwrap_or("-")
                );
                total += entry.size_bytes;
            }
            println!();
            println!(
                "Total: {} entr{}, {}",
                entries.len(),
                if entries.len() == 1 { "y" } else { "ies" },
                style(format_bytes(total)).bold()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            for entry in &entries {
                println!("{}", cache_root.join(&entry.name).display());
            }
        }
    }

    Ok(())
}
