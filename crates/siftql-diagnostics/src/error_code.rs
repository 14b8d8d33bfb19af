//! SiftQL error codes following a structured numbering system
//!
//! Error code ranges:
//! - SIFT0001-SIFT0099: Parse errors (query text)
//! - SIFT0100-SIFT0199: Binding errors (capability configuration)
//! - SIFT0200-SIFT0299: Evaluation errors (runtime)
//! - SIFT0400-SIFT0499: System errors (I/O, input data)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a parse error (0001-0099)
    pub const fn is_parse_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a binding error (0100-0199)
    pub const fn is_binding_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is an evaluation error (0200-0299)
    pub const fn is_evaluation_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIFT{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

// Static error info storage
static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Parse errors (0001-0099)
    map.insert(
        1,
        ErrorInfo::new("Comments not allowed")
            .with_help("Remove // and /* */ comments, or parse with CommentMode::Allow"),
    );

    // Binding errors (0100-0199)
    map.insert(
        100,
        ErrorInfo::new("Unknown type tag").with_help(
            "Valid tags: str, string, int, integer, float, double, dict, list, array, set, bool, boolean, mapid, auto",
        ),
    );

    // Evaluation errors (0200-0299)
    map.insert(200, ErrorInfo::new("Type cast failed"));
    map.insert(201, ErrorInfo::new("Resolver failed"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(401, ErrorInfo::new("I/O error"));
    map.insert(402, ErrorInfo::new("Invalid input data"));

    map
});

// Convenient error code constants

// Parse errors
pub const SIFT0001: ErrorCode = ErrorCode::new(1);

// Binding errors
pub const SIFT0100: ErrorCode = ErrorCode::new(100);

// Evaluation errors
pub const SIFT0200: ErrorCode = ErrorCode::new(200);
pub const SIFT0201: ErrorCode = ErrorCode::new(201);

// System errors
pub const SIFT0400: ErrorCode = ErrorCode::new(400);
pub const SIFT0401: ErrorCode = ErrorCode::new(401);
pub const SIFT0402: ErrorCode = ErrorCode::new(402);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(SIFT0001.to_string(), "SIFT0001");
        assert_eq!(SIFT0200.to_string(), "SIFT0200");
    }

    #[test]
    fn test_error_categories() {
        assert!(SIFT0001.is_parse_error());
        assert!(!SIFT0001.is_binding_error());

        assert!(SIFT0100.is_binding_error());
        assert!(!SIFT0100.is_parse_error());

        assert!(SIFT0200.is_evaluation_error());
        assert!(SIFT0401.is_system_error());
    }

    #[test]
    fn test_error_info() {
        let info = SIFT0200.info();
        assert_eq!(info.description, "Type cast failed");
        assert!(SIFT0100.info().help.is_some());
    }
}
