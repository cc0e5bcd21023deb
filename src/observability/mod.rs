//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Binding and server produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (per-outcome counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every span via tower-http
//! - Metrics are recorded once per call, at its terminal outcome

pub mod logging;
pub mod metrics;
