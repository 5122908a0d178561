//! # Service Errors
//!
//! Status codes and error types returned by a resource service. Every client
//! implementation (in-memory, mock, or a real transport) reports failures as a
//! [`ResourceError`] so callers can branch on [`Code`] regardless of where the
//! request was served.

use std::fmt;

/// Status code attached to every [`ResourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    NotFound,
    AlreadyExists,
    /// Optimistic concurrency check failed.
    Aborted,
    FailedPrecondition,
    InvalidArgument,
    DeadlineExceeded,
    Cancelled,
    Unavailable,
    Internal,
    Unknown,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Code::NotFound => "not found",
            Code::AlreadyExists => "already exists",
            Code::Aborted => "aborted",
            Code::FailedPrecondition => "failed precondition",
            Code::InvalidArgument => "invalid argument",
            Code::DeadlineExceeded => "deadline exceeded",
            Code::Cancelled => "cancelled",
            Code::Unavailable => "unavailable",
            Code::Internal => "internal",
            Code::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A failed call against the resource service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ResourceError {
    pub code: Code,
    pub message: String,
}

impl ResourceError {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Code::NotFound, message)
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self::new(Code::Aborted, message)
    }

    pub fn failed_precondition(message: impl Into<String>) -> Self {
        Self::new(Code::FailedPrecondition, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(Code::Unavailable, message)
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// Absence is a normal outcome for most callers, so it gets its own check.
    pub fn is_not_found(&self) -> bool {
        self.code == Code::NotFound
    }
}

/// Errors raised while packing or unpacking an [`Any`](crate::types::Any) payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to encode {type_url}: {source}")]
    Encode {
        type_url: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode {type_url}: {source}")]
    Decode {
        type_url: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("payload type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },
}
