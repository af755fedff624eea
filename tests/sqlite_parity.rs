//! Integration tests checking our quoting against SQLite itself.
//!
//! Literals and identifiers built with the escapers are run through a real
//! SQLite connection and must come back unchanged.

#![cfg(feature = "testing")]

use arbitrary::{Arbitrary, Unstructured};
use rusqlite::Connection;
use sqlite_tokens_rs::testing::{
    Delimiter, Fragment, FuzzStatement, assert_tokenize_invariants, test_quote_roundtrip,
    test_sqlite_parity, test_statement_roundtrip,
};
use sqlite_tokens_rs::{
    Error, FieldType, quote_identifier, quote_literal, sql_command, sql_get_integer64, sql_query,
    tokenize, unescape,
};

const AWKWARD_VALUES: &[&str] = &[
    "",
    "plain",
    "it's",
    "''",
    "'",
    "\"",
    "a\"\"b",
    "both ' and \"",
    "spaces  and, (punctuation)",
    "naïve café €",
    "line\nbreak\ttab",
    "-- not a comment",
    "'; DROP TABLE users; --",
];

#[test]
fn test_awkward_values_match_sqlite() {
    for raw in AWKWARD_VALUES {
        test_quote_roundtrip(raw);
        test_sqlite_parity(raw);
    }
}

#[test]
fn test_injection_attempt_stays_a_literal() {
    let conn = Connection::open_in_memory().unwrap();
    sql_command(&conn, "CREATE TABLE users (name TEXT)").unwrap();

    let hostile = "x'); DROP TABLE users; --";
    let sql = format!("INSERT INTO users (name) VALUES ({})", quote_literal(hostile));
    sql_command(&conn, &sql).unwrap();

    assert_eq!(sql_get_integer64(&conn, "SELECT COUNT(*) FROM users"), Ok(1));
    let result = sql_query(&conn, "SELECT name FROM users").unwrap();
    assert_eq!(result.value(0, 0), Some(hostile));
}

#[test]
fn test_quoted_table_name_round_trips_through_schema() {
    let conn = Connection::open_in_memory().unwrap();
    let table = "my \"odd\" table";
    let column = "it's";
    let create = format!(
        "CREATE TABLE {} ({} {})",
        quote_identifier(table),
        quote_identifier(column),
        FieldType::String.storage_class()
    );
    sql_command(&conn, &create).unwrap();

    // SQLite stores the statement text verbatim; tokenize it back.
    let stored = sql_query(&conn, "SELECT sql FROM sqlite_master WHERE type = 'table'").unwrap();
    let tokens = tokenize(stored.value(0, 0).unwrap());
    assert_eq!(unescape(&tokens[2]), table);
    assert_eq!(unescape(&tokens[4]), column);
    assert_eq!(tokens[5], "TEXT");

    let count = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
    assert_eq!(sql_get_integer64(&conn, &count), Ok(0));
}

#[test]
fn test_errors_carry_statement_text() {
    let conn = Connection::open_in_memory().unwrap();
    let sql = format!("SELECT * FROM {}", quote_identifier("missing"));
    let Err(Error::Statement { sql: reported, .. }) = sql_query(&conn, &sql) else {
        panic!("expected a statement error");
    };
    assert_eq!(reported, sql);
}

#[test]
fn test_handwritten_statement_roundtrip() {
    let statement = FuzzStatement {
        fragments: vec![
            Fragment::Word("INSERT".into()),
            Fragment::Word("INTO".into()),
            Fragment::Identifier("a \"b\"".into()),
            Fragment::Punctuation(Delimiter::Open),
            Fragment::Literal("it's, (fine)".into()),
            Fragment::Punctuation(Delimiter::Comma),
            Fragment::Word(" ".into()),
            Fragment::Literal(String::new()),
            Fragment::Punctuation(Delimiter::Close),
        ],
    };
    assert_eq!(
        statement.render(),
        "INSERT INTO \"a \"\"b\"\"\" ( 'it''s, (fine)' , '' )"
    );
    test_statement_roundtrip(&statement);
}

#[test]
fn test_arbitrary_statements_roundtrip() {
    // Deterministic byte streams standing in for fuzzer input.
    for seed in 0u8..=255 {
        let bytes: Vec<u8> = (0..512u32)
            .map(|i| u8::try_from((i * 31 + u32::from(seed) * 17) % 251).unwrap())
            .collect();
        let mut unstructured = Unstructured::new(&bytes);
        let Ok(statement) = FuzzStatement::arbitrary(&mut unstructured) else {
            continue;
        };
        test_statement_roundtrip(&statement);
        assert_tokenize_invariants(&String::from_utf8_lossy(&bytes));
    }
}
