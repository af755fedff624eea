//! Quoting and unquoting of SQL literals and identifiers.
//!
//! SQL escapes a delimiter inside a quoted span by writing it twice:
//! `'it''s'` is the literal `it's` and `"a""b"` is the identifier `a"b`.
//! The escapers only double the delimiter; wrapping the result in quotes
//! is left to the caller (or to [`quote_literal`] and [`quote_identifier`]).

use alloc::string::String;

/// One of the two SQL quote characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quote {
    /// `'`, delimiting string literals.
    Single,
    /// `"`, delimiting identifiers.
    Double,
}

impl Quote {
    /// Returns the quote matching `c`, if `c` is `'` or `"`.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }

    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }

    /// Doubles every occurrence of this delimiter in `raw`.
    ///
    /// Not idempotent: escaping twice doubles the delimiters twice.
    #[must_use]
    pub fn escape(self, raw: &str) -> String {
        let quote = self.as_char();
        let mut escaped = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c == quote {
                escaped.push(quote);
            }
            escaped.push(c);
        }
        escaped
    }

    /// Escapes `raw` and wraps it in this delimiter.
    #[must_use]
    pub fn quote(self, raw: &str) -> String {
        let quote = self.as_char();
        let mut quoted = String::with_capacity(raw.len() + 2);
        quoted.push(quote);
        quoted.push_str(&self.escape(raw));
        quoted.push(quote);
        quoted
    }
}

/// Doubles every single quote in `raw`.
///
/// The caller wraps the result in `'...'`.
///
/// ```
/// assert_eq!(sqlite_tokens_rs::escape_literal("it's"), "it''s");
/// ```
#[must_use]
pub fn escape_literal(raw: &str) -> String {
    Quote::Single.escape(raw)
}

/// Doubles every double quote in `raw`.
///
/// The caller wraps the result in `"..."`.
///
/// ```
/// assert_eq!(sqlite_tokens_rs::escape_identifier("a\"b"), "a\"\"b");
/// ```
#[must_use]
pub fn escape_identifier(raw: &str) -> String {
    Quote::Double.escape(raw)
}

/// Escapes `raw` and wraps it in single quotes, ready to embed as a literal.
#[must_use]
pub fn quote_literal(raw: &str) -> String {
    Quote::Single.quote(raw)
}

/// Escapes `raw` and wraps it in double quotes, ready to embed as an identifier.
#[must_use]
pub fn quote_identifier(raw: &str) -> String {
    Quote::Double.quote(raw)
}

/// Strips the quoting from a token and collapses doubled delimiters.
///
/// Tokens that do not start with `'` or `"` (bare words, punctuation, the
/// empty string) are returned unchanged. Scanning stops at the first lone
/// delimiter, so anything after the closing quote is dropped. A token with
/// no closing quote yields everything after the opening one.
///
/// ```
/// use sqlite_tokens_rs::unescape;
///
/// assert_eq!(unescape("'it''s'"), "it's");
/// assert_eq!(unescape("bareword"), "bareword");
/// ```
#[must_use]
pub fn unescape(token: &str) -> String {
    let mut chars = token.chars();
    let Some(quote) = chars.next().and_then(Quote::from_char) else {
        return token.into();
    };
    let (value, _) = scan_quoted_body(chars.as_str(), quote);
    value
}

/// Scans the body of a quoted span (everything after the opening delimiter).
///
/// Returns the unescaped value and, when a closing delimiter was found, the
/// byte offset in `body` just past it.
pub(crate) fn scan_quoted_body(body: &str, quote: Quote) -> (String, Option<usize>) {
    let delimiter = quote.as_char();
    let mut value = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        if c == delimiter && chars.next_if(|&(_, next)| next == delimiter).is_none() {
            return (value, Some(pos + c.len_utf8()));
        }
        value.push(c);
    }
    (value, None)
}
