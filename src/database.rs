//! Thin helpers running statement text against a SQLite connection.
//!
//! This module is gated behind the `rusqlite` feature. The helpers never
//! build statements themselves: callers assemble the text, using
//! [`crate::quote_literal`] and [`crate::quote_identifier`] for interpolated
//! values.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use rusqlite::fallible_iterator::FallibleIterator;
use rusqlite::{Batch, Connection, Statement};
use rusqlite::types::ValueRef;
use tracing::{debug, error};

use crate::errors::Error;

/// Every cell of a query result rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqlResult {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl SqlResult {
    /// Names of the result columns.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Number of result columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of result rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Text of the cell at `column`, `row`.
    ///
    /// Returns `None` for SQL NULL and for out of range positions.
    #[must_use]
    pub fn value(&self, column: usize, row: usize) -> Option<&str> {
        self.rows.get(row)?.get(column)?.as_deref()
    }

    /// Cell at `column`, `row` parsed as a leading decimal integer.
    ///
    /// NULL cells, missing cells and text without leading digits give 0;
    /// values beyond the `i32` range saturate.
    #[must_use]
    pub fn value_as_integer(&self, column: usize, row: usize) -> i32 {
        let value = self.value(column, row).map_or(0, parse_leading_integer);
        i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
    }
}

/// Runs one or more statements, discarding any rows they produce.
///
/// # Errors
///
/// Returns [`Error::Statement`] if SQLite rejects any of the statements.
pub fn sql_command(conn: &Connection, sql: &str) -> Result<(), Error> {
    debug!(sql, "exec");
    conn.execute_batch(sql).map_err(|err| statement_error(sql, &err))
}

/// Runs every statement in `sql` and collects the rows as text.
///
/// Column names come from the first statement that has result columns.
/// Rows of all statements are appended in order, so a batch such as
/// `CREATE ...; INSERT ...; SELECT ...` returns the rows of the `SELECT`.
///
/// # Errors
///
/// Returns [`Error::Statement`] if a statement cannot be prepared or fails
/// while stepping, and [`Error::IncompatibleQueries`] if two statements
/// return rows of different widths.
pub fn sql_query(conn: &Connection, sql: &str) -> Result<SqlResult, Error> {
    debug!(sql, "get_table");
    collect_table(conn, sql)
}

/// Returns the first column of the first row as a 64-bit integer.
///
/// The cell is coerced the way SQLite's `column_int64` does: NULL is 0,
/// reals are truncated and text is parsed as a leading integer.
///
/// # Errors
///
/// Returns [`Error::Statement`] if the statement fails, and
/// [`Error::NoRows`] if it produces no row.
pub fn sql_get_integer64(conn: &Connection, sql: &str) -> Result<i64, Error> {
    debug!(sql, "get");
    first_cell_as_integer(conn, sql)
        .map_err(|err| statement_error(sql, &err))?
        .ok_or_else(|| Error::NoRows { sql: sql.into() })
}

/// Same as [`sql_get_integer64`], truncated to 32 bits.
///
/// # Errors
///
/// See [`sql_get_integer64`].
#[allow(clippy::cast_possible_truncation)]
pub fn sql_get_integer(conn: &Connection, sql: &str) -> Result<i32, Error> {
    sql_get_integer64(conn, sql).map(|value| value as i32)
}

fn collect_table(conn: &Connection, sql: &str) -> Result<SqlResult, Error> {
    let mut result = SqlResult::default();
    let mut batch = Batch::new(conn, sql);
    while let Some(mut stmt) = batch.next().map_err(|err| statement_error(sql, &err))? {
        let column_count = stmt.column_count();
        if result.columns.is_empty() {
            result.columns = stmt.column_names().into_iter().map(String::from).collect();
        }
        let rows = statement_rows(&mut stmt).map_err(|err| statement_error(sql, &err))?;
        if !rows.is_empty() && column_count != result.columns.len() {
            error!(
                sql,
                expected = result.columns.len(),
                found = column_count,
                "incompatible queries"
            );
            return Err(Error::IncompatibleQueries {
                sql: sql.into(),
                expected: result.columns.len(),
                found: column_count,
            });
        }
        result.rows.extend(rows);
    }
    Ok(result)
}

/// Steps `stmt` to completion, rendering each row as text.
fn statement_rows(stmt: &mut Statement<'_>) -> rusqlite::Result<Vec<Vec<Option<String>>>> {
    let column_count = stmt.column_count();
    let mut collected = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(column_count);
        for i in 0..column_count {
            cells.push(value_as_text(row.get_ref(i)?));
        }
        collected.push(cells);
    }
    Ok(collected)
}

fn first_cell_as_integer(conn: &Connection, sql: &str) -> rusqlite::Result<Option<i64>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => Ok(Some(value_as_integer(row.get_ref(0)?))),
        None => Ok(None),
    }
}

fn statement_error(sql: &str, err: &rusqlite::Error) -> Error {
    error!(sql, %err, "statement failed");
    Error::Statement {
        sql: sql.into(),
        message: err.to_string(),
    }
}

/// Renders a cell the way `sqlite3_get_table` reports it.
fn value_as_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(v) => Some(v.to_string()),
        ValueRef::Real(v) => Some(format_real(v)),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Formats a REAL like SQLite's `%!.15g`: 15 significant digits, trailing
/// zeros dropped, and always a digit after the decimal point.
fn format_real(v: f64) -> String {
    if v.is_infinite() {
        return String::from(if v < 0.0 { "-Inf" } else { "Inf" });
    }
    let scientific = format!("{v:.14e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..15).contains(&exponent) {
        let decimals = usize::try_from(14 - exponent).unwrap_or(0);
        trim_fraction(&format!("{v:.decimals$}"))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    }
}

/// Drops trailing zeros after the decimal point, keeping at least one digit.
fn trim_fraction(text: &str) -> String {
    match text.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{text}.0"),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn value_as_integer(value: ValueRef<'_>) -> i64 {
    match value {
        ValueRef::Null => 0,
        ValueRef::Integer(v) => v,
        ValueRef::Real(v) => v as i64,
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            core::str::from_utf8(bytes).map_or(0, parse_leading_integer)
        }
    }
}

/// Parses an optionally signed run of decimal digits after leading
/// whitespace, ignoring anything that follows. Saturates on overflow.
fn parse_leading_integer(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}
