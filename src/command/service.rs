//! The command service seam and a reference implementation.

use async_trait::async_trait;
use axum::http::StatusCode;
use uuid::Uuid;

use crate::command::{CommandError, NewCommandRequest, NewCommandResponse, Reply};

/// The operation exposed over HTTP.
///
/// Implementations own all domain validation; the transport only guarantees
/// the request was valid JSON within the body ceiling. Dropping the returned
/// future cancels the call.
#[async_trait]
pub trait CommandService: Send + Sync + 'static {
    async fn new_command(&self, request: NewCommandRequest) -> Reply<NewCommandResponse>;
}

/// Accepts any named command and assigns it an id.
#[derive(Debug, Clone, Default)]
pub struct BasicCommandService;

impl BasicCommandService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandService for BasicCommandService {
    async fn new_command(&self, request: NewCommandRequest) -> Reply<NewCommandResponse> {
        if request.name.trim().is_empty() {
            return Reply::failure(CommandError::EmptyRequest);
        }

        let response = NewCommandResponse {
            id: Uuid::new_v4(),
            name: request.name,
            payload: request.payload,
        };

        tracing::debug!(command_id = %response.id, name = %response.name, "Command created");
        Reply::with_status(response, StatusCode::CREATED)
    }
}
