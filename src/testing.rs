//! Testing utilities for property and SQLite parity checks.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`FuzzStatement`]: `arbitrary`-generated statement made of known fragments
//! - [`test_statement_roundtrip`]: tokenize a rendered [`FuzzStatement`] and
//!   compare against the fragments it was built from
//! - [`assert_tokenize_invariants`]: structural checks on any tokenizer output
//! - [`test_quote_roundtrip`]: quote then unquote a raw value with both delimiters
//! - [`test_sqlite_parity`]: check that SQLite reads our quoting back unchanged

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use arbitrary::Arbitrary;
use rusqlite::Connection;

use crate::database::sql_query;
use crate::{Quote, TokenKind, Tokenizer, quote_identifier, quote_literal, tokenize, unescape};

/// A punctuation character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Delimiter {
    /// `(`
    Open,
    /// `)`
    Close,
    /// `,`
    Comma,
}

impl Delimiter {
    fn as_char(self) -> char {
        match self {
            Delimiter::Open => '(',
            Delimiter::Close => ')',
            Delimiter::Comma => ',',
        }
    }
}

/// One piece of a generated statement.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub enum Fragment {
    /// A bare word; characters that would end a word are dropped on render.
    Word(String),
    /// A raw value rendered as a single-quoted literal.
    Literal(String),
    /// A raw value rendered as a double-quoted identifier.
    Identifier(String),
    /// A punctuation character.
    Punctuation(Delimiter),
}

impl Fragment {
    /// The token this fragment renders to, or `None` for a word left empty.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Fragment::Word(word) => {
                let word: String = word
                    .chars()
                    .filter(|c| !matches!(c, ' ' | '(' | ')' | ',' | '\'' | '"'))
                    .collect();
                (!word.is_empty()).then_some(word)
            }
            Fragment::Literal(raw) => Some(quote_literal(raw)),
            Fragment::Identifier(raw) => Some(quote_identifier(raw)),
            Fragment::Punctuation(delimiter) => Some(String::from(delimiter.as_char())),
        }
    }
}

/// A statement assembled from fragments separated by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Arbitrary)]
pub struct FuzzStatement {
    /// The fragments, in statement order.
    pub fragments: Vec<Fragment>,
}

impl FuzzStatement {
    /// Tokens the statement is expected to split into.
    #[must_use]
    pub fn expected_tokens(&self) -> Vec<String> {
        self.fragments.iter().filter_map(Fragment::render).collect()
    }

    /// The statement text.
    #[must_use]
    pub fn render(&self) -> String {
        self.expected_tokens().join(" ")
    }
}

/// Tokenize a rendered statement and check every token against its fragment.
///
/// # Panics
///
/// Panics if the tokens differ from the rendered fragments, or if a quoted
/// fragment does not unescape back to its raw value.
pub fn test_statement_roundtrip(statement: &FuzzStatement) {
    let sql = statement.render();
    let tokens = tokenize(&sql);
    assert_eq!(tokens, statement.expected_tokens(), "statement: {sql}");
    assert_tokenize_invariants(&sql);

    let rendered = statement.fragments.iter().filter(|f| f.render().is_some());
    for (fragment, token) in rendered.zip(&tokens) {
        match fragment {
            Fragment::Literal(raw) | Fragment::Identifier(raw) => {
                assert_eq!(&unescape(token), raw, "token: {token}");
            }
            Fragment::Word(_) | Fragment::Punctuation(_) => {
                assert_eq!(&unescape(token), token);
            }
        }
    }
}

/// Check structural properties of the tokenizer output for any input.
///
/// - no token is empty
/// - the tokens appear in order and cover the input apart from spaces and
///   words cut short by a quote opening mid-word
/// - each token tokenizes back to itself
/// - only the final token may be an unterminated quoted span
/// - the lazy iterator agrees with [`tokenize`]
///
/// # Panics
///
/// Panics if any property is violated.
pub fn assert_tokenize_invariants(input: &str) {
    let tokens = tokenize(input);
    assert_eq!(
        Tokenizer::new(input).collect::<Vec<_>>(),
        tokens,
        "iterator disagrees on {input:?}"
    );

    let mut rest = input;
    for (i, token) in tokens.iter().enumerate() {
        assert!(!token.is_empty(), "empty token in {input:?}");
        rest = rest.trim_start_matches(' ');
        if !rest.starts_with(token.as_str()) {
            // A quote opening mid-word discards the word before it.
            let word_len = rest
                .find([' ', '(', ')', ',', '\'', '"'])
                .unwrap_or(rest.len());
            assert!(
                matches!(TokenKind::of(token), Some(TokenKind::Quoted { .. }))
                    && rest[word_len..].starts_with(token.as_str()),
                "token {token:?} does not follow in {input:?}"
            );
            rest = &rest[word_len..];
        }
        rest = &rest[token.len()..];

        assert_eq!(tokenize(token), [token.clone()], "token {token:?} is not stable");

        let kind = TokenKind::of(token);
        if kind.is_some_and(TokenKind::is_unterminated) {
            assert_eq!(i, tokens.len() - 1, "unterminated token {token:?} is not last");
        }
    }
    assert!(
        rest.chars().all(|c| c == ' '),
        "unconsumed input {rest:?} in {input:?}"
    );
}

/// Quote and unquote `raw` with both delimiters.
///
/// # Panics
///
/// Panics if the quoted value does not tokenize as a single terminated span
/// or does not unescape back to `raw`.
pub fn test_quote_roundtrip(raw: &str) {
    for quote in [Quote::Single, Quote::Double] {
        let quoted = quote.quote(raw);
        assert_eq!(tokenize(&quoted), [quoted.clone()], "quoted: {quoted}");
        assert_eq!(
            TokenKind::of(&quoted),
            Some(TokenKind::Quoted {
                quote,
                terminated: true
            })
        );
        assert_eq!(unescape(&quoted), raw, "quoted: {quoted}");
    }
}

/// Check that SQLite reads a quoted literal and a quoted identifier back as `raw`.
///
/// Values containing NUL are skipped since SQLite stops reading statement
/// text there. The identifier check is skipped for the empty value.
///
/// # Panics
///
/// Panics if SQLite rejects the quoting or returns a different value.
pub fn test_sqlite_parity(raw: &str) {
    if raw.contains('\0') {
        return;
    }
    let conn = Connection::open_in_memory().unwrap();

    let sql = format!("SELECT {}", quote_literal(raw));
    let result = sql_query(&conn, &sql).unwrap();
    assert_eq!(result.value(0, 0), Some(raw), "literal mismatch for {sql}");

    if !raw.is_empty() {
        let sql = format!("SELECT 1 AS {}", quote_identifier(raw));
        let result = sql_query(&conn, &sql).unwrap();
        assert_eq!(result.column_names(), [raw], "identifier mismatch for {sql}");
    }
}
