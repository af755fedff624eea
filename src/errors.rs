//! Submodule defining the errors reported by the database helpers.
//!
//! Tokenizing, escaping and unescaping are total and never fail.

use alloc::string::String;

/// Errors that can occur while running statements against SQLite.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// SQLite rejected or failed to run the statement.
    #[error("Statement `{sql}` failed: {message}")]
    Statement {
        /// The statement text.
        sql: String,
        /// The message reported by SQLite.
        message: String,
    },
    /// A scalar query produced no row.
    #[error("Query `{sql}` returned no rows")]
    NoRows {
        /// The statement text.
        sql: String,
    },
    /// Two statements of one query returned rows with different column counts.
    #[error("Query `{sql}` mixes results of {expected} and {found} columns")]
    IncompatibleQueries {
        /// The statement text.
        sql: String,
        /// Column count of the first statement returning columns.
        expected: usize,
        /// Column count of the offending statement.
        found: usize,
    },
}
