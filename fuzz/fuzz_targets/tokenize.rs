//! Tokenizer fuzzer.
//!
//! Feeds arbitrary text to the tokenizer and checks the structural
//! invariants of its output.

use honggfuzz::fuzz;
use sqlite_tokens_rs::testing::assert_tokenize_invariants;

fn main() {
    loop {
        fuzz!(|input: &str| {
            assert_tokenize_invariants(input);
        });
    }
}
