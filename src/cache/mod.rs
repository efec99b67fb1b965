//! Artifact cache: resolve a path-or-URL reference to a local file
//!
//! Remote resources are downloaded exactly once into a content-stable
//! cache keyed by (URL, ETag), with resumable transfers, concurrent
//! access safety, and optional archive extraction. Coordination is
//! purely through the filesystem, so independent processes sharing a
//! cache root converge on a single download per entry.
//!
//! # Cache layout
//!
//! Under the cache root, one entry is up to four files:
//!
//! | File | Contents |
//! |------|----------|
//! | `<hash>` | cached file content |
//! | `<hash>.json` | `{"url": ..., "etag": ...}` provenance record |
//! | `<hash>.lock` | advisory lock marker, never payload |
//! | `<hash>.incomplete` | partial download buffer |
//!
//! plus `<archive-name-with-dots-replaced>-extracted/` for unpacked
//! archives. Entries persist until removed externally; this module
//! never evicts.

pub mod extract;
pub mod fetch;
pub mod lock;

pub use extract::{extraction_dir, is_archive};
pub use lock::EntryLock;

use crate::error::{QescopeError, QescopeResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};
use url::Url;

/// Settings for a single [`resolve`] call
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Directory cache entries live under (default: the process-wide
    /// cache directory from [`crate::config::default_cache_root`])
    pub cache_root: Option<PathBuf>,
    /// Bypass any existing cached copy and re-fetch
    pub force_refresh: bool,
    /// Continue an interrupted download from the bytes already on disk
    pub resume_partial: bool,
    /// Never attempt network access; use only what is already cached
    pub offline_only: bool,
    /// If the resolved file is a zip or tar archive, return the path to
    /// its extracted directory instead of the raw archive
    pub extract_archive: bool,
    /// Re-extract even if an extracted directory already exists
    pub force_reextract: bool,
}

/// Provenance sidecar stored next to each cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub url: String,
    pub etag: String,
}

/// Resolve an artifact reference to a local filesystem path.
///
/// An existing local path is returned verbatim. A remote URL goes
/// through the fetch-and-cache protocol: probe for a freshness token,
/// reuse a matching cache entry when possible, otherwise download under
/// the entry's lock. With `extract_archive` set, archives resolve to
/// their extracted directory instead.
pub fn resolve(reference: &str, options: &ResolveOptions) -> QescopeResult<PathBuf> {
    resolve_with_progress(reference, options, &mut |_| {})
}

/// [`resolve`] with a progress callback receiving cumulative downloaded
/// bytes (including any resumed prefix).
pub fn resolve_with_progress(
    reference: &str,
    options: &ResolveOptions,
    progress: &mut dyn FnMut(u64),
) -> QescopeResult<PathBuf> {
    if reference.is_empty() {
        return Err(QescopeError::InvalidReference(reference.to_string()));
    }

    let resolved = if is_remote_url(reference) {
        fetch_cached(reference, options, progress)?
    } else {
        let path = Path::new(reference);
        if path.exists() {
            // Verbatim pass-through, no copy.
            path.to_path_buf()
        } else if Url::parse(reference).is_err() {
            return Err(QescopeError::NotFound(path.to_path_buf()));
        } else {
            // Parses as a URL but not one we fetch (e.g. s3://, ftp://).
            return Err(QescopeError::InvalidReference(reference.to_string()));
        }
    };

    if options.extract_archive {
        extract::extract_archive(&resolved, options.force_reextract)
    } else {
        Ok(resolved)
    }
}

/// Whether a reference is a remote URL this cache can fetch
pub fn is_remote_url(reference: &str) -> bool {
    match Url::parse(reference) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Deterministic cache filename for a (URL, freshness token) pair:
/// `sha256(url)` in hex, with `.sha256(etag)` appended when the token
/// is non-empty.
pub fn cache_filename(url: &str, etag: &str) -> String {
    let url_hash = hex::encode(Sha256::digest(url.as_bytes()));
    if etag.is_empty() {
        url_hash
    } else {
        let etag_hash = hex::encode(Sha256::digest(etag.as_bytes()));
        format!("{}.{}", url_hash, etag_hash)
    }
}

fn sidecar_path(cache_path: &Path, suffix: &str) -> PathBuf {
    let mut os = cache_path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

/// Sidecar metadata file path for a cache entry
pub fn metadata_path(cache_path: &Path) -> PathBuf {
    sidecar_path(cache_path, ".json")
}

/// Partial download buffer path for a cache entry
pub fn incomplete_path(cache_path: &Path) -> PathBuf {
    sidecar_path(cache_path, ".incomplete")
}

/// Fetch-and-cache protocol for remote URLs.
fn fetch_cached(
    url: &str,
    options: &ResolveOptions,
    progress: &mut dyn FnMut(u64),
) -> QescopeResult<PathBuf> {
    let cache_root = options
        .cache_root
        .clone()
        .unwrap_or_else(crate::config::default_cache_root);
    fs::create_dir_all(&cache_root).map_err(|e| {
        QescopeError::io(format!("creating cache root {}", cache_root.display()), e)
    })?;

    // Step (a): metadata probe, unless offline. Transport failures here
    // degrade to the unknown-token fallback below.
    let mut download_url = url.to_string();
    let mut etag: Option<String> = None;
    if !options.offline_only {
        if let Some(probe) = fetch::probe(url)? {
            match probe.etag {
                Some(token) => etag = Some(token),
                None => {
                    warn!(
                        "remote resource {} has no ETag; cached copies cannot be revalidated",
                        url
                    );
                    etag = Some(String::new());
                }
            }
            if let Some(location) = probe.redirect {
                debug!("{} redirects to {}", url, location);
                download_url = location;
            }
        }
    }

    // Step (b): cache filename is keyed by the display URL, not the
    // post-redirect download URL.
    let cache_path = cache_root.join(cache_filename(url, etag.as_deref().unwrap_or("")));

    // Step (c): freshness unknown, serve whatever is local.
    let Some(etag) = etag else {
        if cache_path.exists() {
            return Ok(cache_path);
        }
        if let Some(fallback) = latest_matching_entry(&cache_root, url)? {
            debug!(
                "serving stale cache entry {} for {}",
                fallback.display(),
                url
            );
            return Ok(fallback);
        }
        return Err(if options.offline_only {
            QescopeError::OfflineUnavailable {
                url: url.to_string(),
            }
        } else {
            QescopeError::ConnectionUnavailable {
                url: url.to_string(),
            }
        });
    };

    // Step (d): cache hit, no lock needed for completed entries.
    if cache_path.exists() && !options.force_refresh {
        debug!("cache hit for {} at {}", url, cache_path.display());
        return Ok(cache_path);
    }

    // Step (e): serialize the download per entry.
    let _lock = EntryLock::acquire(&cache_path)?;

    // The download may have completed while the lock was contended.
    if cache_path.exists() && !options.force_refresh {
        debug!("cache hit for {} after lock wait", url);
        return Ok(cache_path);
    }

    // Step (f): download into the `.incomplete` sibling, never the final
    // path, so readers cannot observe a partial file.
    let staging = incomplete_path(&cache_path);
    let resume_from = if options.resume_partial {
        fs::metadata(&staging).map(|m| m.len()).unwrap_or(0)
    } else {
        0
    };
    let mut dest = if resume_from > 0 {
        OpenOptions::new()
            .append(true)
            .open(&staging)
            .map_err(|e| QescopeError::io(format!("opening {}", staging.display()), e))?
    } else {
        File::create(&staging)
            .map_err(|e| QescopeError::io(format!("creating {}", staging.display()), e))?
    };

    info!("downloading {} to {}", download_url, staging.display());
    fetch::download(&download_url, &mut dest, resume_from, progress)?;
    drop(dest);

    // Step (g): atomic publish, then provenance sidecar.
    fs::rename(&staging, &cache_path).map_err(|e| {
        QescopeError::io(
            format!("moving download into place at {}", cache_path.display()),
            e,
        )
    })?;

    let meta = EntryMetadata {
        url: url.to_string(),
        etag,
    };
    fs::write(metadata_path(&cache_path), serde_json::to_vec(&meta)?)
        .map_err(|e| QescopeError::io("writing cache metadata", e))?;

    info!("stored {} in cache at {}", url, cache_path.display());
    Ok(cache_path)
}

/// Most recently modified cache entry whose filename stem matches the
/// URL's hash, skipping sidecar files. Used when the freshness token is
/// unknown and the exact entry is absent.
fn latest_matching_entry(cache_root: &Path, url: &str) -> QescopeResult<Option<PathBuf>> {
    let stem = cache_filename(url, "");
    let entries = fs::read_dir(cache_root)
        .map_err(|e| QescopeError::io(format!("listing cache root {}", cache_root.display()), e))?;

    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| QescopeError::io("reading cache root entry", e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.split('.').next() != Some(stem.as_str()) {
            continue;
        }
        if name.ends_with(".json") || name.ends_with(".lock") || name.ends_with(".incomplete") {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if best.as_ref().map(|(t, _)| modified > *t).unwrap_or(true) {
            best = Some((modified, entry.path()));
        }
    }
    Ok(best.map(|(_, path)| path))
}
