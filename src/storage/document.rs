//! Backing document
//!
//! Whole-file load and save of the book collection.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::{Config, WriteStrategy};
use crate::error::{Result, ShelfError};
use crate::record::Book;

use super::writer::write_document;

/// Suffix appended to the document name when an unreadable copy is set aside
const CORRUPT_SUFFIX: &str = ".corrupt";

/// Handle to the single JSON document holding the collection
#[derive(Debug, Clone)]
pub struct Document {
    /// Document path
    path: PathBuf,

    /// How `save` replaces the file
    write_strategy: WriteStrategy,

    /// Pretty-print indent width
    indent: usize,
}

impl Document {
    /// Create a handle (does not touch the filesystem)
    pub fn new(path: impl Into<PathBuf>, write_strategy: WriteStrategy, indent: usize) -> Self {
        Self {
            path: path.into(),
            write_strategy,
            indent,
        }
    }

    /// Create a handle from the storage part of a config
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data_file, config.write_strategy, config.indent)
    }

    /// Whether the document exists as a regular file
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the whole collection
    ///
    /// Returns:
    /// - `Err(StoreMissing)`: no regular file at the path
    /// - `Err(Decode)`: the file exists but is not a JSON array of books
    pub fn load(&self) -> Result<Vec<Book>> {
        if !self.exists() {
            return Err(self.missing());
        }

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            // Removed between the check and the read
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(self.missing()),
            Err(e) => return Err(e.into()),
        };

        let books: Vec<Book> =
            serde_json::from_slice(&bytes).map_err(|source| ShelfError::Decode {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!("Loaded {} records from {}", books.len(), self.path.display());
        Ok(books)
    }

    /// Replace the document with the given collection
    pub fn save(&self, books: &[Book]) -> Result<()> {
        let bytes = encode_books(books, self.indent)?;
        write_document(&self.path, &bytes, self.write_strategy)?;

        tracing::debug!(
            "Wrote {} records ({} bytes) to {}",
            books.len(),
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Copy the current (unreadable) document aside and return the backup path
    ///
    /// The first backup is `<file>.corrupt`; later ones get a numeric suffix
    /// (`<file>.corrupt.1`, `<file>.corrupt.2`, ...). Earlier backups are never
    /// overwritten.
    pub fn backup_corrupt(&self) -> Result<PathBuf> {
        let mut attempt = 0u32;
        loop {
            let backup = self.backup_path(attempt);
            match OpenOptions::new().write(true).create_new(true).open(&backup) {
                Ok(mut target) => {
                    let mut source = File::open(&self.path)?;
                    io::copy(&mut source, &mut target)?;
                    target.sync_all()?;
                    tracing::warn!(
                        "Unreadable store {} copied to {}",
                        self.path.display(),
                        backup.display()
                    );
                    return Ok(backup);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Backup path for the given attempt (0 is `<file>.corrupt`)
    pub fn backup_path(&self, attempt: u32) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(CORRUPT_SUFFIX);
        if attempt > 0 {
            name.push(format!(".{}", attempt));
        }
        PathBuf::from(name)
    }

    /// Document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn missing(&self) -> ShelfError {
        ShelfError::StoreMissing {
            path: self.path.clone(),
        }
    }
}

/// Encode a collection as pretty JSON with the given indent width
///
/// serde_json leaves non-ASCII characters unescaped, so titles in any script
/// are stored verbatim.
pub fn encode_books(books: &[Book], indent: usize) -> Result<Vec<u8>> {
    let indent = vec![b' '; indent];
    let mut out = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));

    books
        .serialize(&mut serializer)
        .map_err(|e| ShelfError::Serialization(e.to_string()))?;

    Ok(out)
}
