//! # ShelfKV
//!
//! A personal library catalog persisted in a single JSON document:
//! - Add, delete, search, list and check out/return book records
//! - Monotonic id assignment (highest id + 1)
//! - Whole-document rewrite with atomic rename
//! - Interactive console menu and one-shot subcommands
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Console Session / shelf subcommands             │
//! │          (prompts, bounded retries, error reporting)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ &Catalog
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Catalog                               │
//! │       (id assignment, filters, read-modify-write lock)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Document   │          │   Display   │
//!   │   (JSON)    │          │  (tables)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod catalog;
pub mod display;
pub mod console;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ShelfError, Result};
pub use config::Config;
pub use catalog::Catalog;
pub use record::{Book, NewBook, Status};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ShelfKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
