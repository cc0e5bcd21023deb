//! Transport error types and the error-to-status table.
//!
//! # Design Decisions
//! - Status mapping is an explicit allow-list keyed by `ErrorKind`
//! - Anything not in the table answers 500, including decode failures
//! - The table is a value handed to the binding, never a global

use std::collections::HashMap;
use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

use crate::command::CommandError;

/// Identity of an error for status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The command service found nothing to act on.
    EmptyRequest,
    /// The request body could not be read or parsed.
    Decode,
    /// The reply could not be serialized.
    Encode,
    /// Any other service failure.
    Internal,
}

/// Failure reading or parsing a request body.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read request body: {0}")]
    Read(#[from] axum::Error),

    #[error("request body is empty")]
    EmptyBody,

    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure serializing a reply body.
#[derive(Debug, Error)]
#[error("failed to encode response: {0}")]
pub struct EncodeError(#[from] pub serde_json::Error);

/// The call outlived the configured request timeout.
#[derive(Debug, Error)]
#[error("request timed out after {0:?}")]
pub struct TimeoutError(pub Duration);

/// Any error that ends a call with an error response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl TransportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransportError::Decode(_) => ErrorKind::Decode,
            TransportError::Command(err) => err.kind(),
            TransportError::Encode(_) => ErrorKind::Encode,
        }
    }
}

/// Mapping from error identity to HTTP status.
///
/// Unmapped kinds classify as `500 Internal Server Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTable {
    entries: HashMap<ErrorKind, StatusCode>,
}

impl StatusTable {
    /// A table with no mappings: every error is a 500.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace one mapping.
    pub fn with(mut self, kind: ErrorKind, status: StatusCode) -> Self {
        self.entries.insert(kind, status);
        self
    }

    pub fn status_for(&self, kind: ErrorKind) -> StatusCode {
        self.entries
            .get(&kind)
            .copied()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn classify(&self, err: &TransportError) -> StatusCode {
        self.status_for(err.kind())
    }
}

impl Default for StatusTable {
    /// Only `EmptyRequest` is a client fault.
    fn default() -> Self {
        Self::empty().with(ErrorKind::EmptyRequest, StatusCode::BAD_REQUEST)
    }
}
