//! Console Session
//!
//! Runs the menu loop over any buffered reader and writer.

use std::io::{BufRead, Write};

use crate::catalog::Catalog;
use crate::display::{render_summary, render_table};
use crate::error::{Result, ShelfError};
use crate::record::NewBook;

use super::prompt::{parse_id, parse_year, Prompted};

const MENU: &str = "
Choose a command:
1. Add a book - add a new book to the library.
2. Delete a book - delete a book by its ID.
3. Find books - search by title, author or year.
4. Show all books - list every book.
5. Update a book's status - set it to 'available' or 'checked_out'.
0. Exit - quit the program.
";

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Search,
    List,
    UpdateStatus,
    Exit,
}

impl MenuChoice {
    /// Map a menu number to its entry
    pub fn from_number(n: i64) -> Option<Self> {
        match n {
            0 => Some(MenuChoice::Exit),
            1 => Some(MenuChoice::Add),
            2 => Some(MenuChoice::Delete),
            3 => Some(MenuChoice::Search),
            4 => Some(MenuChoice::List),
            5 => Some(MenuChoice::UpdateStatus),
            _ => None,
        }
    }
}

/// An interactive session bound to one catalog
///
/// Only failures of the output writer end the session early; every catalog
/// error is reported and control returns to the menu.
pub struct Session<'a, R, W> {
    /// The catalog all commands run against
    catalog: &'a Catalog,

    /// User input
    reader: R,

    /// Prompts, messages and tables
    writer: W,

    /// Retries allowed after the first bad numeric answer
    max_retries: usize,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Create a session using the catalog's configured retry limit
    pub fn new(catalog: &'a Catalog, reader: R, writer: W) -> Self {
        let max_retries = catalog.config().max_retries;
        Self {
            catalog,
            reader,
            writer,
            max_retries,
        }
    }

    /// Run the menu loop until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.writer.write_all(MENU.as_bytes())?;

            let line = match self.read_answer("Enter command: ")? {
                Some(line) => line,
                None => {
                    tracing::debug!("Input closed, leaving menu");
                    return Ok(());
                }
            };

            let choice = match line.trim().parse::<i64>() {
                Ok(n) => MenuChoice::from_number(n),
                Err(_) => {
                    writeln!(self.writer, "Enter a number")?;
                    continue;
                }
            };

            match choice {
                Some(MenuChoice::Exit) => {
                    writeln!(self.writer, "Goodbye.")?;
                    return Ok(());
                }
                Some(choice) => self.dispatch(choice)?,
                None => writeln!(self.writer, "Enter a number from 0 to 5 inclusive")?,
            }
        }
    }

    /// Run a single menu command
    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => self.add_book(),
            MenuChoice::Delete => self.delete_book(),
            MenuChoice::Search => self.search_books(),
            MenuChoice::List => self.show_all(),
            MenuChoice::UpdateStatus => self.update_status(),
            MenuChoice::Exit => Ok(()),
        }
    }

    /// Consume the session and return the writer
    pub fn into_writer(self) -> W {
        self.writer
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn add_book(&mut self) -> Result<()> {
        writeln!(self.writer, "Enter the book details to add it.")?;

        let Some(title) = self.read_answer("Title: ")? else {
            return Ok(());
        };
        let Some(author) = self.read_answer("Author: ")? else {
            return Ok(());
        };
        let Some(year) = self.prompt_parsed("Year: ", parse_year)?.value() else {
            return Ok(());
        };

        match self.catalog.add(NewBook::new(title, author, year)) {
            Ok(book) => writeln!(
                self.writer,
                "Book '{}' added with ID {}.",
                book.title, book.id
            )?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn delete_book(&mut self) -> Result<()> {
        let Some(id) = self
            .prompt_parsed("ID of the book to delete: ", parse_id)?
            .value()
        else {
            return Ok(());
        };

        match self.catalog.delete(id) {
            Ok(_) => writeln!(self.writer, "Book with ID {} deleted.", id)?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn search_books(&mut self) -> Result<()> {
        let Some(field) = self.read_answer("Field to search by (title, author, year): ")? else {
            return Ok(());
        };
        let Some(value) = self.read_answer("Value to search for: ")? else {
            return Ok(());
        };

        match self.catalog.search(field.trim(), &value) {
            Ok(books) => self.writer.write_all(render_summary(&books).as_bytes())?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn show_all(&mut self) -> Result<()> {
        match self.catalog.list_all() {
            Ok(books) => self.writer.write_all(render_table(&books).as_bytes())?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn update_status(&mut self) -> Result<()> {
        let Some(id) = self
            .prompt_parsed("ID of the book to update: ", parse_id)?
            .value()
        else {
            return Ok(());
        };
        let Some(status) = self.read_answer("New status - 'available' or 'checked_out': ")? else {
            return Ok(());
        };

        match self.catalog.update_status(id, status.trim()) {
            Ok(book) => writeln!(
                self.writer,
                "Status of book with ID {} updated to '{}'.",
                book.id, book.status
            )?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    // =========================================================================
    // Input Helpers
    // =========================================================================

    /// Ask until `parse` accepts, allowing `max_retries` retries
    ///
    /// The rejection message from `parse` is shown after each bad answer.
    fn prompt_parsed<T, F>(&mut self, question: &str, parse: F) -> Result<Prompted<T>>
    where
        F: Fn(&str) -> std::result::Result<T, String>,
    {
        for _ in 0..=self.max_retries {
            let Some(line) = self.read_answer(question)? else {
                return Ok(Prompted::Closed);
            };
            match parse(&line) {
                Ok(value) => return Ok(Prompted::Value(value)),
                Err(msg) => writeln!(self.writer, "{}", msg)?,
            }
        }

        writeln!(
            self.writer,
            "Too many invalid attempts. Start over from the menu."
        )?;
        Ok(Prompted::Exhausted)
    }

    /// Print a prompt and read one line without its line ending
    ///
    /// Returns `None` at end of input.
    fn read_answer(&mut self, question: &str) -> Result<Option<String>> {
        self.writer.write_all(question.as_bytes())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Write a catalog error as a single line
    fn report(&mut self, err: &ShelfError) -> Result<()> {
        if !err.is_store_condition() {
            tracing::error!("Catalog operation failed: {}", err);
        }
        writeln!(self.writer, "{}", err)?;
        Ok(())
    }
}
