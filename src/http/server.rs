//! HTTP server setup and the command endpoint binding.
//!
//! # Responsibilities
//! - Bind the command route to decode → invoke → encode
//! - Apply caller options (hooks, timeout, status table)
//! - Wire up middleware (request ID, tracing)
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::command::{CommandService, NewCommandRequest, Reply};
use crate::config::ServiceConfig;
use crate::http::error::{TimeoutError, TransportError};
use crate::http::options::ServerOptions;
use crate::http::request::decode_request;
use crate::http::response::{encode_error, encode_response};
use crate::http::X_REQUEST_ID;
use crate::observability::metrics::{self, Outcome};

/// The command operation bound to HTTP.
///
/// Stateless apart from the shared service and options, so one value is
/// cloned into every call.
#[derive(Clone)]
pub struct CommandEndpoint {
    service: Arc<dyn CommandService>,
    options: Arc<ServerOptions>,
}

impl CommandEndpoint {
    pub fn new(service: Arc<dyn CommandService>, options: ServerOptions) -> Self {
        Self {
            service,
            options: Arc::new(options),
        }
    }

    /// Run one call to exactly one terminal outcome.
    pub async fn handle(&self, request: Request) -> Response {
        let start = Instant::now();
        let (mut parts, body) = request.into_parts();

        for hook in &self.options.before {
            hook(&mut parts);
        }

        let command: NewCommandRequest = match decode_request(body).await {
            Ok(command) => command,
            Err(err) => {
                let err = TransportError::from(err);
                let status = self.options.status_table.classify(&err);
                tracing::warn!(error = %err, status = %status, "Failed to decode command request");
                self.options.report(&err);
                metrics::record_call(Outcome::DecodeFailure, status, start);
                return encode_error(&err, status);
            }
        };

        let reply = self.service.new_command(command).await;
        self.respond(reply, start)
    }

    /// Encode a reply, run after-hooks and record the outcome.
    fn respond<T: Serialize>(&self, reply: Reply<T>, start: Instant) -> Response {
        let outcome = match reply.error() {
            Some(err) => {
                tracing::warn!(error = %err, "Command rejected");
                self.options.report(err);
                Outcome::InvocationFailure
            }
            None => Outcome::Success,
        };

        let mut response = match encode_response(reply, &self.options.status_table) {
            Ok(response) => response,
            Err(err) => {
                let err = TransportError::from(err);
                tracing::error!(error = %err, "Failed to encode command response");
                self.options.report(&err);
                metrics::record_call(
                    Outcome::EncodeFailure,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    start,
                );
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        for hook in &self.options.after {
            hook(response.headers_mut());
        }

        metrics::record_call(outcome, response.status(), start);
        response
    }
}

async fn new_command_handler(
    State(endpoint): State<CommandEndpoint>,
    request: Request,
) -> Response {
    endpoint.handle(request).await
}

/// Mount the command endpoint on `route_path` (POST).
#[allow(deprecated)]
pub fn make_http_handlers(
    route_path: &str,
    service: Arc<dyn CommandService>,
    options: ServerOptions,
) -> Router {
    let timeout = options.timeout;
    let router = Router::new()
        .route(route_path, post(new_command_handler))
        .with_state(CommandEndpoint::new(service, options));

    match timeout {
        Some(timeout) => router
            .layer(TimeoutLayer::new(timeout))
            .layer(middleware::map_response(move |response: Response| async move {
                timeout_envelope(response, timeout)
            })),
        None => router,
    }
}

/// Give the bare 408 produced by `TimeoutLayer` an error envelope.
fn timeout_envelope(response: Response, timeout: Duration) -> Response {
    let bare = response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE);
    if !bare {
        return response;
    }
    tracing::warn!(timeout = ?timeout, "Command request timed out");
    encode_error(&TimeoutError(timeout), StatusCode::REQUEST_TIMEOUT)
}

/// HTTP server for the command endpoint.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server whose timeout comes from configuration.
    pub fn new(config: ServiceConfig, service: Arc<dyn CommandService>) -> Self {
        let options = ServerOptions::new().timeout(config.transport.request_timeout());
        Self::with_options(config, service, options)
    }

    /// Create a server with caller-supplied options.
    pub fn with_options(
        config: ServiceConfig,
        service: Arc<dyn CommandService>,
        options: ServerOptions,
    ) -> Self {
        let router = Self::build_router(&config, service, options);
        Self { router, config }
    }

    fn build_router(
        config: &ServiceConfig,
        service: Arc<dyn CommandService>,
        options: ServerOptions,
    ) -> Router {
        make_http_handlers(&config.transport.route_path, service, options)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "command_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until a shutdown signal arrives, then drain in-flight calls.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            route = %self.config.transport.route_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
