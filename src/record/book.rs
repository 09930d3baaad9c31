//! Book record
//!
//! A single catalog entry plus the generic field lookup used by search.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Status;

/// One catalog entry as stored in the backing document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique id, assigned by the catalog
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default)]
    pub status: Status,
}

/// Input for `Catalog::add` (the id is assigned by the catalog)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: Status,
}

impl NewBook {
    /// A new book with the default `available` status
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            status: Status::Available,
        }
    }

    /// Override the initial status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Attach the assigned id
    pub(crate) fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
            status: self.status,
        }
    }
}

impl Book {
    /// Stringified value of the named attribute, or `None` for unknown names
    ///
    /// Goes through the serialized form so every attribute, string or not,
    /// follows one rule: strings verbatim, numbers in decimal.
    pub fn field_text(&self, name: &str) -> Option<String> {
        let value = serde_json::to_value(self).ok()?;
        match value.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => Some(String::new()),
            other => Some(other.to_string()),
        }
    }

    /// Case-insensitive equality of `field_text(name)` against `needle`
    pub fn matches(&self, name: &str, needle: &str) -> bool {
        match self.field_text(name) {
            Some(text) => text.to_lowercase() == needle.to_lowercase(),
            None => false,
        }
    }
}
