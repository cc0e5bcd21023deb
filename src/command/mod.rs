//! The "create a command" operation.
//!
//! # Data Flow
//! ```text
//! NewCommandRequest (decoded by http::request)
//!     → CommandService::new_command
//!     → Reply<NewCommandResponse> (encoded by http::response)
//! ```
//!
//! # Design Decisions
//! - The service never sees HTTP types except the optional status override
//! - Failures travel inside the reply, not beside it

pub mod error;
pub mod reply;
pub mod service;
pub mod types;

pub use error::CommandError;
pub use reply::Reply;
pub use service::{BasicCommandService, CommandService};
pub use types::{NewCommandRequest, NewCommandResponse};
