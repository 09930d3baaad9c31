//! Console Module
//!
//! The interactive menu over a catalog.
//!
//! ## Responsibilities
//! - Show the menu and dispatch the chosen command
//! - Prompt for text and numbers, retrying bad numeric input a bounded
//!   number of times
//! - Report every catalog condition as one line and return to the menu
//!
//! ## Menu
//! ```text
//! 1. Add a book
//! 2. Delete a book
//! 3. Find books
//! 4. Show all books
//! 5. Update a book's status
//! 0. Exit
//! ```

mod prompt;
mod session;

pub use prompt::{parse_id, parse_year, Prompted};
pub use session::{MenuChoice, Session};
