//! Cross-cutting options for the command endpoint.
//!
//! The binding applies these without interpreting them: hooks are called,
//! the timeout is handed to tower-http, the status table classifies errors.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{request::Parts, HeaderMap};

use crate::http::error::StatusTable;

/// Runs against the request head before the body is decoded.
pub type BeforeHook = Arc<dyn Fn(&mut Parts) + Send + Sync>;

/// Runs against the headers of an encoded reply before it is sent.
pub type AfterHook = Arc<dyn Fn(&mut HeaderMap) + Send + Sync>;

/// Observes every error that ends a call.
pub type ErrorHandler = Arc<dyn Fn(&(dyn std::error::Error + 'static)) + Send + Sync>;

/// Builder for the options consumed by the endpoint binding.
#[derive(Clone, Default)]
pub struct ServerOptions {
    pub(crate) before: Vec<BeforeHook>,
    pub(crate) after: Vec<AfterHook>,
    pub(crate) error_handler: Option<ErrorHandler>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) status_table: StatusTable,
}

impl ServerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook run before decoding. Hooks run in insertion order.
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Parts) + Send + Sync + 'static,
    {
        self.before.push(Arc::new(hook));
        self
    }

    /// Append a hook run on every encoded reply. Decode failures skip these.
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut HeaderMap) + Send + Sync + 'static,
    {
        self.after.push(Arc::new(hook));
        self
    }

    /// Replace the error handler. Without one, errors are logged.
    pub fn error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&(dyn std::error::Error + 'static)) + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    /// Bound each call. Expiry answers `408 Request Timeout` with an error
    /// envelope; the service future is dropped.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn status_table(mut self, table: StatusTable) -> Self {
        self.status_table = table;
        self
    }

    pub(crate) fn report(&self, err: &(dyn std::error::Error + 'static)) {
        match &self.error_handler {
            Some(handler) => handler(err),
            None => tracing::debug!(error = %err, "Call ended with error"),
        }
    }
}

impl fmt::Debug for ServerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerOptions")
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .field("error_handler", &self.error_handler.is_some())
            .field("timeout", &self.timeout)
            .field("status_table", &self.status_table)
            .finish()
    }
}
