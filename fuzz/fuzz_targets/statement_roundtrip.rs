//! Statement round-trip fuzzer.
//!
//! Builds a statement from arbitrary fragments, tokenizes it, and verifies
//! that the tokens match the fragments and unescape back to their values.

use honggfuzz::fuzz;
use sqlite_tokens_rs::testing::{FuzzStatement, test_statement_roundtrip};

fn main() {
    loop {
        fuzz!(|statement: FuzzStatement| {
            test_statement_roundtrip(&statement);
        });
    }
}
