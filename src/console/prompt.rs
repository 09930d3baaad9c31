//! Prompt parsing
//!
//! Tagged results for bounded-retry prompts and the parsers they use.

/// Outcome of a prompt that may be retried
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted<T> {
    /// A valid answer
    Value(T),

    /// Every attempt was rejected; the current operation should be abandoned
    Exhausted,

    /// Input ended before a valid answer arrived
    Closed,
}

impl<T> Prompted<T> {
    /// The answer, if one was given
    pub fn value(self) -> Option<T> {
        match self {
            Prompted::Value(v) => Some(v),
            Prompted::Exhausted | Prompted::Closed => None,
        }
    }
}

/// Parse a publication year
pub fn parse_year(input: &str) -> Result<i32, String> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| "Enter a number".to_string())
}

/// Parse a record id: a positive integer
pub fn parse_id(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    match trimmed.parse::<u64>() {
        Ok(0) => Err("ID must be a positive number".to_string()),
        Ok(id) => Ok(id),
        // Negative integers are numbers, just not valid ids
        Err(_) if trimmed.parse::<i64>().is_ok() => {
            Err("ID must be a positive number".to_string())
        }
        Err(_) => Err("Enter a number".to_string()),
    }
}
