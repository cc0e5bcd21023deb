//! Errors returned by the command service.

use thiserror::Error;

use crate::http::error::ErrorKind;

/// Errors the command service can hand back to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The request carried nothing to act on.
    #[error("empty request")]
    EmptyRequest,

    /// Any other failure inside the service.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CommandError {
    /// Identity used by the status table.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::EmptyRequest => ErrorKind::EmptyRequest,
            CommandError::Internal(_) => ErrorKind::Internal,
        }
    }
}
