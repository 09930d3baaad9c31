//! Record Module
//!
//! The book record and its status flag.
//!
//! ## Persisted Shape
//! ```text
//! {
//!     "id": 1,
//!     "title": "Dune",
//!     "author": "Herbert",
//!     "year": 1965,
//!     "status": "available"
//! }
//! ```

mod book;

pub use book::{Book, NewBook};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShelfError;

/// Whether a book is on the shelf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// On the shelf (default for new records)
    #[default]
    Available,

    /// Lent out
    CheckedOut,
}

impl Status {
    /// The persisted spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ShelfError;

    /// Accepts exactly `available` or `checked_out`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Status::Available),
            "checked_out" => Ok(Status::CheckedOut),
            other => Err(ShelfError::InvalidStatus(other.to_string())),
        }
    }
}
