//! Quote-aware tokenizer for SQL statement text.
//!
//! The tokenizer splits a statement into three kinds of tokens, told apart
//! only by their text:
//! - words: runs of characters that are not spaces, punctuation or quotes
//! - punctuation: a single `(`, `)` or `,`
//! - quoted spans: `'...'` or `"..."`, with doubled delimiters kept verbatim
//!
//! Only the ASCII space separates tokens. A quote opening in the middle of a
//! word starts a new quoted span and the word before it is discarded. An
//! unterminated quoted span is not an error: whatever was collected is
//! emitted without a closing quote.

use alloc::string::String;
use alloc::vec::Vec;
use core::iter::{FusedIterator, Peekable};
use core::str::Chars;

use crate::escape::{Quote, scan_quoted_body};

/// Splits `input` into tokens.
///
/// ```
/// use sqlite_tokens_rs::tokenize;
///
/// assert_eq!(tokenize("f(a, 'b c')"), ["f", "(", "a", ",", "'b c'", ")"]);
/// ```
#[must_use]
pub fn tokenize(input: &str) -> Vec<String> {
    Tokenizer::new(input).collect()
}

/// Scan state while building one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Between tokens.
    Gap,
    /// Accumulating an unquoted word.
    InWord,
    /// Accumulating a span opened by the given quote.
    InQuote(Quote),
}

/// Lazy tokenizer yielding one token per call to [`Iterator::next`].
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer over the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut state = ScanState::Gap;
        let mut token = String::new();
        loop {
            match state {
                ScanState::Gap => {
                    let c = self.chars.next()?;
                    match c {
                        ' ' => {}
                        '(' | ')' | ',' => return Some(String::from(c)),
                        _ => {
                            token.push(c);
                            state = Quote::from_char(c).map_or(ScanState::InWord, ScanState::InQuote);
                        }
                    }
                }
                ScanState::InWord => {
                    let Some(&c) = self.chars.peek() else {
                        return Some(token);
                    };
                    if let Some(quote) = Quote::from_char(c) {
                        // A quote opening mid-word discards the word collected so far.
                        token.clear();
                        state = ScanState::InQuote(quote);
                    } else if is_word_boundary(c) {
                        // Space or punctuation stays in the input for the next call.
                        return Some(token);
                    }
                    token.push(c);
                    self.chars.next();
                }
                ScanState::InQuote(quote) => {
                    let Some(c) = self.chars.next() else {
                        return Some(token);
                    };
                    token.push(c);
                    if c == quote.as_char() {
                        match self.chars.next_if_eq(&c) {
                            Some(escaped) => token.push(escaped),
                            None => return Some(token),
                        }
                    }
                }
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Characters that end an unquoted word.
fn is_word_boundary(c: char) -> bool {
    matches!(c, ' ' | '(' | ')' | ',' | '\'' | '"')
}

/// Kind of a token, recovered from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// An unquoted word.
    Word,
    /// One of `(`, `)` or `,`.
    Punctuation,
    /// A span opened by a quote character.
    Quoted {
        /// The opening delimiter.
        quote: Quote,
        /// Whether the span ends with its closing delimiter.
        terminated: bool,
    },
}

impl TokenKind {
    /// Classifies a token produced by [`tokenize`].
    ///
    /// Returns `None` for the empty string, which the tokenizer never yields.
    /// Callers that reject unterminated quotes check `terminated` here, since
    /// the tokenizer itself is lenient.
    #[must_use]
    pub fn of(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let first = chars.next()?;
        if let Some(quote) = Quote::from_char(first) {
            let body = chars.as_str();
            let (_, end) = scan_quoted_body(body, quote);
            return Some(Self::Quoted {
                quote,
                terminated: end == Some(body.len()),
            });
        }
        if matches!(first, '(' | ')' | ',') && chars.as_str().is_empty() {
            Some(Self::Punctuation)
        } else {
            Some(Self::Word)
        }
    }

    /// Returns true for quoted spans missing their closing delimiter.
    #[must_use]
    pub fn is_unterminated(self) -> bool {
        matches!(
            self,
            Self::Quoted {
                terminated: false,
                ..
            }
        )
    }
}
