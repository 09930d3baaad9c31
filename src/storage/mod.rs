//! Storage Module
//!
//! The backing document: one JSON array holding the whole collection.
//!
//! ## Responsibilities
//! - Load and decode the full collection
//! - Encode the collection as pretty-printed JSON (non-ASCII kept verbatim)
//! - Replace the document on every mutation (atomic rename or in place)
//! - Set aside undecodable documents before they are overwritten
//!
//! ## File Format
//! ```text
//! [
//!     {
//!         "id": 1,
//!         "title": "Dune",
//!         "author": "Herbert",
//!         "year": 1965,
//!         "status": "available"
//!     }
//! ]
//! ```
//!
//! There is no header, schema version or checksum; the file is read and
//! rewritten whole.

mod document;
mod writer;

pub use document::{encode_books, Document};
pub use writer::write_document;
