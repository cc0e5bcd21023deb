//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use command_transport::command::{
    CommandError, CommandService, NewCommandRequest, NewCommandResponse, Reply,
};
use command_transport::config::ServiceConfig;
use command_transport::http::HttpServer;
use command_transport::lifecycle::Shutdown;
use tokio::net::TcpListener;
use uuid::Uuid;

/// Echoes the request back, optionally with an explicit status.
#[allow(dead_code)]
pub struct EchoService {
    pub status: Option<StatusCode>,
}

#[async_trait]
impl CommandService for EchoService {
    async fn new_command(&self, request: NewCommandRequest) -> Reply<NewCommandResponse> {
        let body = NewCommandResponse {
            id: Uuid::nil(),
            name: request.name,
            payload: request.payload,
        };
        match self.status {
            Some(status) => Reply::with_status(body, status),
            None => Reply::ok(body),
        }
    }
}

/// Always fails with the given error.
#[allow(dead_code)]
pub struct FailingService(pub CommandError);

#[async_trait]
impl CommandService for FailingService {
    async fn new_command(&self, _: NewCommandRequest) -> Reply<NewCommandResponse> {
        Reply::failure(self.0.clone())
    }
}

/// Sleeps past any reasonable timeout.
#[allow(dead_code)]
pub struct SlowService(pub Duration);

#[async_trait]
impl CommandService for SlowService {
    async fn new_command(&self, request: NewCommandRequest) -> Reply<NewCommandResponse> {
        tokio::time::sleep(self.0).await;
        EchoService { status: None }.new_command(request).await
    }
}

/// Serve `service` on an ephemeral port. The server stops when the returned
/// `Shutdown` is triggered or dropped.
#[allow(dead_code)]
pub async fn spawn_server(service: Arc<dyn CommandService>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(ServiceConfig::default(), service);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}
