//! ShelfKV CLI
//!
//! Interactive menu by default; one-shot subcommands for scripting.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shelfkv::config::{CorruptPolicy, WriteStrategy};
use shelfkv::console::Session;
use shelfkv::display::{render, render_summary, OutputMode};
use shelfkv::{Book, Catalog, Config, NewBook, Result, Status};
use tracing_subscriber::{fmt, EnvFilter};

/// ShelfKV CLI
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(about = "Personal library catalog backed by a JSON file")]
#[command(version)]
struct Args {
    /// Backing JSON document
    #[arg(short, long, default_value = "./books.json")]
    data_file: PathBuf,

    /// Rewrite the document in place instead of via temp file + rename
    #[arg(long)]
    in_place: bool,

    /// What `add` does with an unreadable document: overwrite, fail or backup
    #[arg(long, default_value = "backup")]
    on_corrupt: CorruptPolicy,

    /// Print results as JSON (subcommands only)
    #[arg(long)]
    json: bool,

    /// Log catalog activity to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a book
    Add {
        /// Book title
        title: String,

        /// Book author
        author: String,

        /// Publication year
        #[arg(allow_negative_numbers = true)]
        year: i32,

        /// Initial status (available or checked_out)
        #[arg(long, default_value = "available")]
        status: String,
    },

    /// Delete a book by ID
    Delete {
        /// The ID to delete
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,
    },

    /// Find books whose field equals a value (case-insensitive)
    Search {
        /// Field name (title, author, year, ...)
        field: String,

        /// Value to compare against
        value: String,
    },

    /// Show all books sorted by ID
    List,

    /// Set a book's status
    Status {
        /// The ID to update
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,

        /// New status (available or checked_out)
        status: String,
    },
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging (stderr keeps the menu on stdout clean)
    let default_filter = if args.verbose { "warn,shelfkv=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    tracing::debug!("ShelfKV v{}", shelfkv::VERSION);

    let write_strategy = if args.in_place {
        WriteStrategy::InPlace
    } else {
        WriteStrategy::Atomic
    };

    let config = Config::builder()
        .data_file(&args.data_file)
        .write_strategy(write_strategy)
        .corrupt_policy(args.on_corrupt)
        .build();

    let catalog = match Catalog::open(config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to open catalog: {}", e);
            std::process::exit(1);
        }
    };

    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Pretty
    };

    let outcome = match args.command {
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            Session::new(&catalog, stdin.lock(), stdout.lock()).run()
        }
        Some(command) => run_command(&catalog, command, mode),
    };

    if let Err(e) = outcome {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Execute one subcommand and print its result
fn run_command(catalog: &Catalog, command: Commands, mode: OutputMode) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Add {
            title,
            author,
            year,
            status,
        } => {
            let status: Status = status.parse()?;
            let book = catalog.add(NewBook::new(title, author, year).with_status(status))?;
            print_book(&mut out, &book, mode, "added")?;
        }
        Commands::Delete { id } => {
            let book = catalog.delete(id)?;
            print_book(&mut out, &book, mode, "deleted")?;
        }
        Commands::Search { field, value } => {
            let books = catalog.search(&field, &value)?;
            let text = match mode {
                OutputMode::Pretty => render_summary(&books),
                OutputMode::Json => render(&books, mode)?,
            };
            out.write_all(text.as_bytes())?;
        }
        Commands::List => {
            let books = catalog.list_all()?;
            out.write_all(render(&books, mode)?.as_bytes())?;
        }
        Commands::Status { id, status } => {
            let book = catalog.update_status(id, &status)?;
            print_book(&mut out, &book, mode, "updated")?;
        }
    }

    Ok(())
}

/// Confirmation line (or the record as JSON) for a single-record mutation
fn print_book(out: &mut impl Write, book: &Book, mode: OutputMode, verb: &str) -> Result<()> {
    match mode {
        OutputMode::Pretty => writeln!(
            out,
            "Book '{}' (ID {}, {}) {}.",
            book.title, book.id, book.status, verb
        )?,
        OutputMode::Json => {
            let text = serde_json::to_string_pretty(book)
                .map_err(|e| shelfkv::ShelfError::Serialization(e.to_string()))?;
            writeln!(out, "{}", text)?;
        }
    }
    Ok(())
}
