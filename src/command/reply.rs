//! The value a command service hands back to the transport.

use axum::http::StatusCode;

use crate::command::CommandError;

/// Outcome of a single invocation.
///
/// A reply is either a body to serialize, optionally with a status that
/// replaces the default `200 OK`, or an error to render as an envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Success { body: T, status: Option<StatusCode> },
    Failure(CommandError),
}

impl<T> Reply<T> {
    /// Successful reply with the default status.
    pub fn ok(body: T) -> Self {
        Reply::Success { body, status: None }
    }

    /// Successful reply with an explicit status.
    pub fn with_status(body: T, status: StatusCode) -> Self {
        Reply::Success {
            body,
            status: Some(status),
        }
    }

    pub fn failure(err: CommandError) -> Self {
        Reply::Failure(err)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Reply::Failure(_))
    }

    /// The carried error, if any.
    pub fn error(&self) -> Option<&CommandError> {
        match self {
            Reply::Failure(err) => Some(err),
            Reply::Success { .. } => None,
        }
    }
}

impl<T> From<Result<T, CommandError>> for Reply<T> {
    fn from(result: Result<T, CommandError>) -> Self {
        match result {
            Ok(body) => Reply::ok(body),
            Err(err) => Reply::Failure(err),
        }
    }
}
