//! # Error Handling
//!
//! Error types for the routing smoke-test suite, built on `thiserror`.
//! Everything in the library returns [`Result`]; test code converts to
//! assertion failures at the boundary.

mod types;

pub use types::{Error, Result};
