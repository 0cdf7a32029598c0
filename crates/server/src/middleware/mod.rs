//! HTTP middleware stack for the bridge.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. `TraceLayer` (request span with method, URI, status, latency)
//! 3. Request ID (correlate log lines and Sentry events per call)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
