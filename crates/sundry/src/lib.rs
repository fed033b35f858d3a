//! Small, independent utility modules for Rust applications
//!
//! This crate is a standard-library supplement: dictionary helpers,
//! string and list manipulation, date parsing, HTML entity handling,
//! minimal SQL-string builders, a scoped stopwatch, and similar
//! conveniences. Every module is a leaf utility with no shared state;
//! all functions are synchronous and pure or nearly pure.

pub mod batches;
pub mod coding;
pub mod currency;
pub mod dates;
pub mod dicts;
pub mod html;
pub mod http;
pub mod lock;
pub mod mappings;
pub mod sequences;
pub mod sql;
pub mod stopwatch;
pub mod strings;
pub mod times;
pub mod words;

pub use sundry_core::{Error, Result};
