//! SiftQL diagnostics and error handling
//!
//! This crate provides the error handling infrastructure for the SiftQL
//! implementation: error codes, the shared error enum, and the result alias
//! used across the workspace.

mod error;
mod error_code;

pub use error::*;
pub use error_code::*;

/// Result type for SiftQL operations
pub type Result<T> = std::result::Result<T, SiftError>;
