//! SiftQL error types

use crate::{ErrorCode, SIFT0200, SIFT0201, SIFT0401};
use thiserror::Error;

/// Boxed error used to carry foreign failures (cast sources, resolver causes)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main SiftQL error type
#[derive(Debug, Error)]
pub enum SiftError {
    /// Parse error (comment policy violation)
    #[error("{code}: {message}")]
    Parse {
        code: ErrorCode,
        message: String,
        query: String,
    },

    /// Binding error (invalid configuration discovered while binding a field)
    #[error("{code}: {message}")]
    Binding {
        code: ErrorCode,
        message: String,
        field: Option<String>,
    },

    /// Type cast error, wrapping the original conversion failure
    #[error("{code}: {message}")]
    Cast {
        code: ErrorCode,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Resolver error reported by a host resolver
    #[error("{code}: {message}")]
    Resolver {
        code: ErrorCode,
        message: String,
        field: Option<String>,
    },

    /// System error (I/O, input data)
    #[error("{code}: {message}")]
    System { code: ErrorCode, message: String },
}

impl SiftError {
    /// Create a parse error
    pub fn parse(code: ErrorCode, message: impl Into<String>, query: impl Into<String>) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            query: query.into(),
        }
    }

    /// Create a binding error
    pub fn binding(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Binding {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Create a binding error attributed to a field
    pub fn binding_in(
        code: ErrorCode,
        message: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::Binding {
            code,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a cast error from the original failure, preserving its message
    pub fn cast(source: BoxError) -> Self {
        Self::Cast {
            code: SIFT0200,
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Create a cast error with a plain message and no underlying cause
    pub fn cast_message(message: impl Into<String>) -> Self {
        Self::Cast {
            code: SIFT0200,
            message: message.into(),
            source: None,
        }
    }

    /// Create a resolver error
    pub fn resolver(message: impl Into<String>) -> Self {
        Self::Resolver {
            code: SIFT0201,
            message: message.into(),
            field: None,
        }
    }

    /// Create a resolver error attributed to a field
    pub fn resolver_in(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Resolver {
            code: SIFT0201,
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a system error
    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
        }
    }

    /// Create a system error from an I/O failure
    pub fn io(err: std::io::Error) -> Self {
        Self::System {
            code: SIFT0401,
            message: err.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { code, .. } => *code,
            Self::Binding { code, .. } => *code,
            Self::Cast { code, .. } => *code,
            Self::Resolver { code, .. } => *code,
            Self::System { code, .. } => *code,
        }
    }

    /// Get the field this error is attributed to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Binding { field, .. } | Self::Resolver { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SIFT0001, SIFT0100};
    use std::error::Error;

    #[test]
    fn test_parse_error() {
        let err = SiftError::parse(SIFT0001, "Comments not allowed", "// x\n{a}");
        assert_eq!(err.code(), SIFT0001);
        assert!(err.to_string().starts_with("SIFT0001"));
    }

    #[test]
    fn test_binding_error_field() {
        let err = SiftError::binding_in(SIFT0100, "unknown type tag 'blob'", "age");
        assert_eq!(err.field(), Some("age"));
    }

    #[test]
    fn test_cast_error_preserves_source() {
        let cause = "abc".parse::<i64>().unwrap_err();
        let err = SiftError::cast(Box::new(cause));
        assert_eq!(err.code(), SIFT0200);
        assert!(err.to_string().contains("invalid digit"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_cast_error_without_source() {
        let err = SiftError::cast_message("cannot cast map to int");
        assert!(err.source().is_none());
        assert!(err.to_string().contains("cannot cast map to int"));
    }

    #[test]
    fn test_resolver_error() {
        let err = SiftError::resolver_in("backend unavailable", "friends");
        assert_eq!(err.code(), SIFT0201);
        assert_eq!(err.field(), Some("friends"));
    }
}
