//! Response and error encoding.
//!
//! # Responsibilities
//! - Render a `Reply` as exactly one of: error envelope, success body
//! - Render any error as the `{"error": "<message>"}` envelope
//!
//! # Design Decisions
//! - All bodies are pretty-printed JSON with two-space indentation
//! - The status is fixed before the body is attached
//! - Serialization failures are returned, never re-encoded as an envelope

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::command::Reply;
use crate::http::error::{EncodeError, StatusTable, TransportError};

/// Wire shape of every error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Encode a reply.
///
/// A failure is classified through `table` and rendered by [`encode_error`].
/// A success is serialized with its explicit status, or `200 OK`.
pub fn encode_response<T: Serialize>(
    reply: Reply<T>,
    table: &StatusTable,
) -> Result<Response, EncodeError> {
    match reply {
        Reply::Failure(err) => {
            let err = TransportError::from(err);
            Ok(encode_error(&err, table.classify(&err)))
        }
        Reply::Success { body, status } => {
            json_response(status.unwrap_or(StatusCode::OK), &body)
        }
    }
}

/// Encode an error envelope with the status chosen by the caller.
pub fn encode_error(err: &dyn std::error::Error, status: StatusCode) -> Response {
    match json_response(status, &ErrorEnvelope::from_error(err)) {
        Ok(response) => response,
        Err(encode_err) => {
            tracing::error!(error = %encode_err, "Failed to encode error envelope");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn json_response<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Response, EncodeError> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Ok(response)
}
