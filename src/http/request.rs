//! Request decoding.
//!
//! # Responsibilities
//! - Read at most `MAX_BODY_BYTES` from the request body
//! - Parse the bytes read as a single JSON document
//!
//! # Design Decisions
//! - The ceiling truncates the stream; `Content-Length` is never consulted
//! - Bytes past the ceiling are left unread, so an oversized document fails
//!   to parse instead of being partially accepted
//! - Only the first JSON value is read; trailing bytes are ignored

use axum::body::Body;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

use crate::http::error::DecodeError;

/// Upper bound on bytes read from a request body.
pub const MAX_BODY_BYTES: usize = 10_000;

/// Decode a JSON request body read up to `MAX_BODY_BYTES`.
pub async fn decode_request<T: DeserializeOwned>(body: Body) -> Result<T, DecodeError> {
    let bytes = read_limited(body, MAX_BODY_BYTES).await?;
    parse_json(&bytes)
}

/// Collect body frames until `limit` bytes are buffered or the body ends.
pub async fn read_limited(mut body: Body, limit: usize) -> Result<Vec<u8>, DecodeError> {
    let mut buf = Vec::new();

    while buf.len() < limit {
        let Some(frame) = body.frame().await else {
            break;
        };
        // Trailers carry no data.
        if let Ok(data) = frame?.into_data() {
            let take = data.len().min(limit - buf.len());
            buf.extend_from_slice(&data[..take]);
        }
    }

    Ok(buf)
}

fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<T>();
    match values.next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(err)) => Err(DecodeError::Json(err)),
        None => Err(DecodeError::EmptyBody),
    }
}
