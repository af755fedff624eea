//! Quoting parity fuzzer.
//!
//! Quotes an arbitrary value as a literal and as an identifier, and checks
//! that both our unescaper and SQLite read it back unchanged.

use honggfuzz::fuzz;
use sqlite_tokens_rs::testing::{test_quote_roundtrip, test_sqlite_parity};

fn main() {
    loop {
        fuzz!(|raw: String| {
            test_quote_roundtrip(&raw);
            test_sqlite_parity(&raw);
        });
    }
}
