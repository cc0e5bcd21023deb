//! Metrics collection and exposition.
//!
//! # Metrics
//! - `command_requests_total` (counter): calls by outcome and status
//! - `command_request_duration_seconds` (histogram): latency by outcome

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::StatusCode;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Terminal outcome of one call through the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    DecodeFailure,
    InvocationFailure,
    EncodeFailure,
    Success,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::DecodeFailure => "decode_failure",
            Outcome::InvocationFailure => "invocation_failure",
            Outcome::EncodeFailure => "encode_failure",
            Outcome::Success => "success",
        }
    }
}

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished call.
pub fn record_call(outcome: Outcome, status: StatusCode, start: Instant) {
    metrics::counter!(
        "command_requests_total",
        "outcome" => outcome.as_str(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);

    metrics::histogram!(
        "command_request_duration_seconds",
        "outcome" => outcome.as_str()
    )
    .record(start.elapsed().as_secs_f64());
}
