//! Tower middleware layers for the solrq transport.
//!
//! Layers wrap the [`crate::HyperClient`] service. Add them with
//! [`crate::HyperClientBuilder::layer`]; the last layer added is the first to
//! see a request.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! Anything implementing `tower::Layer` over the boxed client service can be
//! plugged in the same way, e.g. `tower::limit::ConcurrencyLimitLayer`.

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
