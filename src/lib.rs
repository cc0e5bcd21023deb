//! HTTP/JSON transport for the "create a command" operation.

pub mod client;
pub mod command;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use client::{ClientError, CommandClient};
pub use command::{CommandService, Reply};
pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
