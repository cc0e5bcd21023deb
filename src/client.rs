//! Client for the command endpoint.
//!
//! The error decoder is the inverse of `http::response::encode_error`: any
//! non-success body is expected to be an `ErrorEnvelope`.

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::command::{NewCommandRequest, NewCommandResponse};
use crate::http::response::ErrorEnvelope;

/// An error reported by the server through the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {source}")]
    Remote {
        status: StatusCode,
        #[source]
        source: RemoteError,
    },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Parse an error envelope body back into the server's message.
pub fn decode_error(body: &[u8]) -> Result<RemoteError, serde_json::Error> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body)?;
    Ok(RemoteError {
        message: envelope.error,
    })
}

pub struct CommandClient {
    client: Client,
    endpoint: String,
}

impl CommandClient {
    /// `base_url` is the server origin, `route_path` the mounted command path.
    pub fn new(base_url: &str, route_path: &str) -> Self {
        Self::with_client(Client::new(), base_url, route_path)
    }

    pub fn with_client(client: Client, base_url: &str, route_path: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), route_path),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create a command on the server.
    pub async fn new_command(
        &self,
        request: &NewCommandRequest,
    ) -> Result<NewCommandResponse, ClientError> {
        let resp = self.client.post(&self.endpoint).json(request).send().await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let source = decode_error(&body)?;
            return Err(ClientError::Remote { status, source });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
