//! Document Writer
//!
//! Replaces the backing document with new contents.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::config::WriteStrategy;
use crate::error::Result;

/// Write `bytes` as the full contents of `path`
///
/// - `Atomic`: the bytes go to a temp file in the same directory, which is
///   fsynced and renamed over `path`. Readers see either the old or the new
///   document, never a torn one.
/// - `InPlace`: `path` is truncated and rewritten.
///
/// Missing parent directories are created.
pub fn write_document(path: &Path, bytes: &[u8], strategy: WriteStrategy) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    match strategy {
        WriteStrategy::Atomic => {
            let mut tmp = NamedTempFile::new_in(parent)?;
            tmp.write_all(bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(path).map_err(|e| e.error)?;
        }
        WriteStrategy::InPlace => {
            let mut file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
        }
    }

    Ok(())
}
