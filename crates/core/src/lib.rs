//! Core error types for the sundry utility crates
//!
//! Every fallible operation in the workspace returns the [`Error`] enum
//! defined here, so callers deal with exactly one error type no matter
//! which utility module they import.

pub mod errors;

pub use errors::{Error, Result};
