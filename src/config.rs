//! Configuration for ShelfKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, ShelfError};

/// Widest pretty-print indent accepted by `validate`
const MAX_INDENT: usize = 16;

/// Most input retries accepted by `validate`
const MAX_RETRIES: usize = 10;

/// Main configuration for a catalog instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The backing document holding the whole collection
    pub data_file: PathBuf,

    /// How the document is replaced on every mutation
    pub write_strategy: WriteStrategy,

    /// What `add` does when the existing document cannot be decoded
    pub corrupt_policy: CorruptPolicy,

    /// Pretty-print indent width (spaces)
    pub indent: usize,

    // -------------------------------------------------------------------------
    // Console Configuration
    // -------------------------------------------------------------------------
    /// Retries allowed after the first bad answer to a numeric prompt
    pub max_retries: usize,
}

/// Document write strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Write a temp file next to the document, fsync, then rename over it
    Atomic,

    /// Truncate the document and write in place (a crash mid-write can corrupt it)
    InPlace,
}

/// Policy for `add` when the document exists but fails to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptPolicy {
    /// Discard the unreadable content and write only the new record
    Overwrite,

    /// Refuse the add and return the decode error
    Fail,

    /// Copy the unreadable document to `<file>.corrupt`, then continue as empty
    Backup,
}

impl FromStr for CorruptPolicy {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CorruptPolicy::Overwrite),
            "fail" => Ok(CorruptPolicy::Fail),
            "backup" => Ok(CorruptPolicy::Backup),
            other => Err(ShelfError::Config(format!(
                "unknown corrupt policy '{}' (expected overwrite, fail or backup)",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./books.json"),
            write_strategy: WriteStrategy::Atomic,
            corrupt_policy: CorruptPolicy::Backup,
            indent: 4,
            max_retries: 3,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration for values the store cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ShelfError::Config("data file path is empty".to_string()));
        }
        if self.indent > MAX_INDENT {
            return Err(ShelfError::Config(format!(
                "indent {} exceeds maximum of {}",
                self.indent, MAX_INDENT
            )));
        }
        if self.max_retries > MAX_RETRIES {
            return Err(ShelfError::Config(format!(
                "max_retries {} exceeds maximum of {}",
                self.max_retries, MAX_RETRIES
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing document path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the write strategy
    pub fn write_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.config.write_strategy = strategy;
        self
    }

    /// Set the policy for adding to an undecodable document
    pub fn corrupt_policy(mut self, policy: CorruptPolicy) -> Self {
        self.config.corrupt_policy = policy;
        self
    }

    /// Set the pretty-print indent width
    pub fn indent(mut self, width: usize) -> Self {
        self.config.indent = width;
        self
    }

    /// Set the number of retries for numeric prompts
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
