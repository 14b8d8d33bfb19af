//! CLI functionality for the SiftQL tool
//!
//! This module contains all CLI-related functionality including:
//! - Query inspection (tree)
//! - Syntax checking
//! - Execution against JSON data files
//! - Input and output handling

#[cfg(feature = "cli")]
pub mod check;
#[cfg(feature = "cli")]
pub mod execute;
#[cfg(feature = "cli")]
pub mod input;
#[cfg(feature = "cli")]
pub mod output;
#[cfg(feature = "cli")]
pub mod tree;
