//! Request and response payloads for the command endpoint.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload accepted by `POST /commands`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCommandRequest {
    /// Command name. A missing or blank name is rejected by the service.
    #[serde(default)]
    pub name: String,

    /// Arbitrary command arguments, passed through untouched.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// A command accepted by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCommandResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}
