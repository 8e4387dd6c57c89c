//! Request/response logging middleware.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

/// Layer that logs each select request and its outcome.
///
/// # Example
///
/// ```ignore
/// use solrq::middleware::LoggingLayer;
/// use solrq::HyperClient;
///
/// let client = HyperClient::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level, with request headers.
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub const fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// Level this layer logs at.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "solr_request", %url);

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(
                            headers = ?request.headers(),
                            timeout = ?request.timeout(),
                            "sending request"
                        );
                    }
                    LogLevel::Info => info!("sending request"),
                }

                let result = inner.call(request).await;

                // Saturating conversion to u64
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_ok() => {
                        info!(status = response.status(), elapsed_ms, "request completed");
                    }
                    Ok(response) => {
                        warn!(status = response.status(), elapsed_ms, "request failed with HTTP error");
                    }
                    Err(err) => warn!(error = %err, elapsed_ms, "request failed"),
                }

                result
            }
            .instrument(span),
        )
    }
}
