#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;
#[cfg(feature = "testing")]
extern crate std;

#[cfg(feature = "rusqlite")]
pub mod database;
pub mod errors;
pub mod escape;
pub mod storage_class;
#[cfg(feature = "testing")]
pub mod testing;
pub mod tokenizer;

// Re-export main types
pub use escape::{
    Quote, escape_identifier, escape_literal, quote_identifier, quote_literal, unescape,
};
pub use storage_class::{FieldType, StorageClass};
pub use tokenizer::{TokenKind, Tokenizer, tokenize};

#[cfg(feature = "rusqlite")]
pub use database::{SqlResult, sql_command, sql_get_integer, sql_get_integer64, sql_query};

// Re-export errors
pub use errors::Error;
