//! Archive detection and extraction for resolved artifacts
//!
//! A resolved file that is a zip or tar archive can be unpacked next to
//! itself into a deterministically named directory. Extraction shares
//! the entry lock with downloads, and is idempotent: a populated output
//! directory is reused unless re-extraction is forced.

use crate::cache::lock::EntryLock;
use crate::error::{QescopeError, QescopeResult};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info};
use zip::ZipArchive;

/// Whether `path` looks like an archive this crate can unpack
pub fn is_archive(path: &Path) -> bool {
    is_zip(path) || is_tarball(path)
}

/// Deterministic extraction directory for an archive:
/// dots replaced by dashes, `-extracted` appended, sibling of the file.
/// `"model.zip"` becomes `"model-zip-extracted/"`.
pub fn extraction_dir(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?.to_str()?;
    let dir_name = format!("{}-extracted", file_name.replace('.', "-"));
    Some(path.with_file_name(dir_name))
}

/// Unpack `path` if it is a recognized archive, returning the extraction
/// directory; non-archives are returned unchanged.
///
/// A populated extraction directory short-circuits unless `force` is
/// set. The unpack itself runs under the archive's entry lock, clearing
/// any stale half-extracted directory first.
pub fn extract_archive(path: &Path, force: bool) -> QescopeResult<PathBuf> {
    if !is_archive(path) {
        return Ok(path.to_path_buf());
    }

    let output_dir = extraction_dir(path)
        .ok_or_else(|| QescopeError::InvalidReference(path.display().to_string()))?;

    if output_dir.is_dir() && !force && dir_is_populated(&output_dir) {
        debug!("reusing extracted archive at {}", output_dir.display());
        return Ok(output_dir);
    }

    // Prevent parallel extractions of the same archive.
    let _lock = EntryLock::acquire(path)?;

    if output_dir.is_dir() && !force && dir_is_populated(&output_dir) {
        return Ok(output_dir);
    }

    if output_dir.exists() {
        fs::remove_dir_all(&output_dir).map_err(|e| {
            QescopeError::io(
                format!("clearing stale extraction dir {}", output_dir.display()),
                e,
            )
        })?;
    }
    fs::create_dir_all(&output_dir)
        .map_err(|e| QescopeError::io(format!("creating {}", output_dir.display()), e))?;

    info!("extracting {} to {}", path.display(), output_dir.display());
    if is_zip(path) {
        unpack_zip(path, &output_dir)?;
    } else if is_tarball(path) {
        unpack_tar(path, &output_dir)?;
    } else {
        // Unreachable given the check above; kept for the day the
        // detection and unpack lists drift apart.
        return Err(QescopeError::UnsupportedArchive(path.to_path_buf()));
    }

    Ok(output_dir)
}

fn dir_is_populated(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

fn read_at(path: &Path, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    let mut file = File::open(path)?;
    file.seek(SeekFrom::Start(offset))?;
    file.read(buf)
}

fn is_zip(path: &Path) -> bool {
    let mut magic = [0u8; 4];
    match read_at(path, 0, &mut magic) {
        Ok(4) => {
            matches!(
                magic,
                [b'P', b'K', 0x03, 0x04] | [b'P', b'K', 0x05, 0x06] | [b'P', b'K', 0x07, 0x08]
            )
        }
        _ => false,
    }
}

fn is_gzip(path: &Path) -> bool {
    let mut magic = [0u8; 2];
    matches!(read_at(path, 0, &mut magic), Ok(2) if magic == [0x1f, 0x8b])
}

/// Plain tar (ustar magic at offset 257) or gzip-compressed tar
fn is_tarball(path: &Path) -> bool {
    if is_gzip(path) {
        return true;
    }
    let mut magic = [0u8; 5];
    matches!(read_at(path, 257, &mut magic), Ok(5) if &magic == b"ustar")
}

fn unpack_zip(path: &Path, dest: &Path) -> QescopeResult<()> {
    let file =
        File::open(path).map_err(|e| QescopeError::io(format!("opening {}", path.display()), e))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| QescopeError::io("opening zip archive", io::Error::other(e)))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| QescopeError::io("reading zip entry", io::Error::other(e)))?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            // Entries escaping the destination are skipped outright.
            continue;
        };
        let target = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| QescopeError::io(format!("creating {}", target.display()), e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| QescopeError::io(format!("creating {}", parent.display()), e))?;
            }
            let mut out = File::create(&target)
                .map_err(|e| QescopeError::io(format!("creating {}", target.display()), e))?;
            io::copy(&mut entry, &mut out)
                .map_err(|e| QescopeError::io(format!("writing {}", target.display()), e))?;
        }
    }
    Ok(())
}

fn unpack_tar(path: &Path, dest: &Path) -> QescopeResult<()> {
    let file =
        File::open(path).map_err(|e| QescopeError::io(format!("opening {}", path.display()), e))?;
    let unpack_err =
        |e: io::Error| QescopeError::io(format!("unpacking {}", path.display()), e);
    if is_gzip(path) {
        Archive::new(GzDecoder::new(file))
            .unpack(dest)
            .map_err(unpack_err)
    } else {
        Archive::new(file).unpack(dest).map_err(unpack_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::FileOptions::default();
        for (name, contents) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    fn write_tarball(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut builder = tar::Builder::new(file);
        for (name, contents) in entries {
            let mut header = tar::Header::new_ustar();
            header.set_size(contents.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, contents.as_bytes())
                .unwrap();
        }
        builder.finish().unwrap();
    }

    #[test]
    fn detects_zip_and_tar() {
        let dir = TempDir::new().unwrap();
        let zip_path = dir.path().join("model.zip");
        let tar_path = dir.path().join("model.tar");
        let plain_path = dir.path().join("model.bin");

        write_zip(&zip_path, &[("a.txt", "hello")]);
        write_tarball(&tar_path, &[("a.txt", "hello")]);
        fs::write(&plain_path, b"not an archive").unwrap();

        assert!(is_archive(&zip_path));
        assert!(is_archive(&tar_path));
        assert!(!is_archive(&plain_path));
    }

    #[test]
    fn extraction_dir_replaces_dots() {
        let dir = extraction_dir(Path::new("/cache/model.zip")).unwrap();
        assert_eq!(dir, PathBuf::from("/cache/model-zip-extracted"));
    }

    #[test]
    fn non_archive_passes_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, b"just text").unwrap();

        let resolved = extract_archive(&path, false).unwrap();
        assert_eq!(resolved, path);
    }

    #[test]
    fn extracts_zip_contents() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("model.zip");
        write_zip(&archive, &[("weights.bin", "w"), ("vocab/tokens.txt", "v")]);

        let out = extract_archive(&archive, false).unwrap();

        assert_eq!(out, dir.path().join("model-zip-extracted"));
        assert_eq!(fs::read_to_string(out.join("weights.bin")).unwrap(), "w");
        assert_eq!(
            fs::read_to_string(out.join("vocab/tokens.txt")).unwrap(),
            "v"
        );
    }

    #[test]
    fn extracts_tar_contents() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("model.tar");
        write_tarball(&archive, &[("weights.bin", "w")]);

        let out = extract_archive(&archive, false).unwrap();

        assert_eq!(out, dir.path().join("model-tar-extracted"));
        assert_eq!(fs::read_to_string(out.join("weights.bin")).unwrap(), "w");
    }

    #[test]
    fn extraction_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("model.zip");
        write_zip(&archive, &[("a.txt", "first")]);

        let out = extract_archive(&archive, false).unwrap();

        // Marker survives a second non-forced extraction.
        fs::write(out.join("marker"), b"kept").unwrap();
        let again = extract_archive(&archive, false).unwrap();
        assert_eq!(again, out);
        assert!(out.join("marker").exists());
    }

    #[test]
    fn force_reextract_clears_directory() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("model.zip");
        write_zip(&archive, &[("a.txt", "first")]);

        let out = extract_archive(&archive, false).unwrap();
        fs::write(out.join("marker"), b"stale").unwrap();

        let again = extract_archive(&archive, true).unwrap();
        assert_eq!(again, out);
        assert!(!out.join("marker").exists());
        assert!(out.join("a.txt").exists());
    }

    #[test]
    fn empty_extraction_dir_is_repopulated() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("model.zip");
        write_zip(&archive, &[("a.txt", "data")]);

        let out = extraction_dir(&archive).unwrap();
        fs::create_dir_all(&out).unwrap();

        // An empty directory does not count as already extracted.
        let resolved = extract_archive(&archive, false).unwrap();
        assert_eq!(resolved, out);
        assert!(out.join("a.txt").exists());
    }
}
