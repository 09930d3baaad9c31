//! Catalog Module
//!
//! The catalog store: durable CRUD and filtered queries over the book
//! collection.
//!
//! ## Responsibilities
//! - Assign ids to new records (highest existing id + 1)
//! - Read-modify-write the backing document for every mutation
//! - Filter and sort records for the console and presentation layers
//! - Apply the configured policy when `add` meets an undecodable document

use std::path::Path;

use parking_lot::Mutex;

use crate::config::{Config, CorruptPolicy};
use crate::error::{Result, ShelfError};
use crate::record::{Book, NewBook, Status};
use crate::storage::Document;

/// Handle to one catalog, owning the path of its backing document
///
/// ## Concurrency Model
///
/// Every mutation is a full load → modify → save cycle. Within one process the
/// cycles are serialized by `write_lock`, so a shared `&Catalog` is safe to
/// use from several threads. Nothing coordinates separate processes; a second
/// writer on the same file will race.
///
/// ## Failure Policy
///
/// - Missing document: reads return `StoreMissing`; `add` treats it as an
///   empty collection and creates the file.
/// - Undecodable document: reads return `Decode` and leave the file alone;
///   `add` follows `Config::corrupt_policy`.
/// - `NotFound`, `EmptyCollection` and `InvalidStatus` never write.
pub struct Catalog {
    /// Catalog configuration
    config: Config,

    /// The backing document
    document: Document,

    /// Serializes read-modify-write cycles (add/delete/update)
    write_lock: Mutex<()>,
}

impl Catalog {
    /// Open a catalog with the given config
    ///
    /// Validates the config but does not create the document; the first `add`
    /// does that.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        let document = Document::from_config(&config);
        if !document.exists() {
            tracing::debug!(
                "Store {} does not exist yet; it will be created on first add",
                document.path().display()
            );
        }

        Ok(Self {
            config,
            document,
            write_lock: Mutex::new(()),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_file(path).build())
    }

    // =========================================================================
    // Id Assignment
    // =========================================================================

    /// The last assigned id, or 0 if the store is missing, unreadable or empty
    ///
    /// Read-only; failures are logged, not returned.
    pub fn last_id(&self) -> u64 {
        match self.document.load() {
            Ok(books) => max_id(&books),
            Err(e) => {
                tracing::warn!("Treating store as empty for id assignment: {}", e);
                0
            }
        }
    }

    /// The id the next `add` will assign
    ///
    /// Returns `IdExhausted` when the last id is `u64::MAX`.
    pub fn next_id(&self) -> Result<u64> {
        successor(self.last_id())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a record and return it with its assigned id
    ///
    /// Steps:
    /// 1. Acquire write lock
    /// 2. Load the collection (missing → empty; undecodable → corrupt policy)
    /// 3. Assign highest id + 1
    /// 4. Append and save the whole document
    ///
    /// Ids come from the highest id still stored, so deleting the highest
    /// record lets the next `add` assign that id again. Ids freed lower down
    /// are never reused.
    ///
    /// Returns `IdExhausted` without writing when the highest id is `u64::MAX`.
    pub fn add(&self, book: NewBook) -> Result<Book> {
        let _write_guard = self.write_lock.lock();

        let mut books = self.load_for_add()?;
        let record = book.into_book(successor(max_id(&books))?);
        books.push(record.clone());

        self.document.save(&books)?;

        tracing::info!(id = record.id, title = %record.title, "Book added");
        Ok(record)
    }

    /// Remove the record with the given id and return it
    ///
    /// Returns `EmptyCollection` or `NotFound` without writing when there is
    /// nothing to remove.
    pub fn delete(&self, id: u64) -> Result<Book> {
        let _write_guard = self.write_lock.lock();

        let mut books = self.load_non_empty()?;
        let removed = books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(ShelfError::NotFound { id })?;

        books.retain(|b| b.id != id);
        self.document.save(&books)?;

        tracing::info!(id, "Book deleted");
        Ok(removed)
    }

    /// Set the status of a record from its persisted spelling
    ///
    /// `new_status` must be `available` or `checked_out`; anything else is
    /// rejected with `InvalidStatus` before the document is touched.
    pub fn update_status(&self, id: u64, new_status: &str) -> Result<Book> {
        let status: Status = new_status.parse()?;
        self.set_status(id, status)
    }

    /// Set the status of the first record with the given id
    pub fn set_status(&self, id: u64, status: Status) -> Result<Book> {
        let _write_guard = self.write_lock.lock();

        let mut books = self.load_non_empty()?;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ShelfError::NotFound { id })?;

        book.status = status;
        let updated = book.clone();

        self.document.save(&books)?;

        tracing::info!(id, status = %status, "Book status updated");
        Ok(updated)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Records whose named attribute, stringified, equals `value` ignoring case
    ///
    /// Any attribute name is accepted (`id`, `title`, `author`, `year`,
    /// `status`); unknown names match nothing. Results keep document order.
    pub fn search(&self, field: &str, value: &str) -> Result<Vec<Book>> {
        let books = self.load_non_empty()?;

        let results: Vec<Book> = books
            .into_iter()
            .filter(|b| b.matches(field, value))
            .collect();

        tracing::debug!(field, value, hits = results.len(), "Search finished");
        Ok(results)
    }

    /// All records sorted by id ascending
    pub fn list_all(&self) -> Result<Vec<Book>> {
        let mut books = self.load_non_empty()?;
        books.sort_by_key(|b| b.id);
        Ok(books)
    }

    /// A single record by id
    pub fn get(&self, id: u64) -> Result<Book> {
        self.load_non_empty()?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or(ShelfError::NotFound { id })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing document path
    pub fn data_file(&self) -> &Path {
        self.document.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Load for read paths and update/delete: an empty collection is an error
    fn load_non_empty(&self) -> Result<Vec<Book>> {
        let books = self.document.load()?;
        if books.is_empty() {
            return Err(ShelfError::EmptyCollection);
        }
        Ok(books)
    }

    /// Load for `add`: missing is empty, undecodable follows the corrupt policy
    fn load_for_add(&self) -> Result<Vec<Book>> {
        match self.document.load() {
            Ok(books) => Ok(books),
            Err(ShelfError::StoreMissing { path }) => {
                tracing::info!("Creating store {}", path.display());
                Ok(Vec::new())
            }
            Err(e @ ShelfError::Decode { .. }) => match self.config.corrupt_policy {
                CorruptPolicy::Fail => Err(e),
                CorruptPolicy::Overwrite => {
                    tracing::warn!("Discarding unreadable store contents: {}", e);
                    Ok(Vec::new())
                }
                CorruptPolicy::Backup => {
                    self.document.backup_corrupt()?;
                    Ok(Vec::new())
                }
            },
            Err(e) => Err(e),
        }
    }
}

/// Highest id in the collection, or 0
fn max_id(books: &[Book]) -> u64 {
    books.iter().map(|b| b.id).max().unwrap_or(0)
}

/// The id after `last`
fn successor(last: u64) -> Result<u64> {
    last.checked_add(1).ok_or(ShelfError::IdExhausted { last })
}
