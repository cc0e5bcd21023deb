//! HTTP transport for the command operation.
//!
//! # Data Flow
//! ```text
//! POST /commands
//!     → request.rs (bounded read, JSON decode)
//!     → CommandService::new_command
//!     → response.rs (success body or error envelope)
//!     → error.rs (status classification)
//! ```

pub mod error;
pub mod options;
pub mod request;
pub mod response;
pub mod server;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

pub use error::{DecodeError, EncodeError, ErrorKind, StatusTable, TimeoutError, TransportError};
pub use options::ServerOptions;
pub use request::{decode_request, MAX_BODY_BYTES};
pub use response::{encode_error, encode_response, ErrorEnvelope};
pub use server::{make_http_handlers, CommandEndpoint, HttpServer};
