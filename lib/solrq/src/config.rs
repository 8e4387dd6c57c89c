//! Timeouts for the hyper transport.
//!
//! Nothing is bounded by default: a select call waits for as long as Solr
//! and the TCP stack take. A deadline comes either from the request itself
//! ([`Request::timeout`], set by `SolrClient::fetch_body_with_timeout`) or,
//! failing that, from [`ClientConfig::timeout`].

use std::time::Duration;

use crate::Request;

/// Timeouts used by [`crate::HyperClient`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Deadline for a whole exchange when the request carries none.
    pub timeout: Option<Duration>,
    /// Deadline for establishing the TCP connection.
    pub connect_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Bound every request that has no deadline of its own.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Bound connection establishment.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Deadline that applies to `request`, if any.
    #[must_use]
    pub fn deadline_for(&self, request: &Request) -> Option<Duration> {
        request.timeout().or(self.timeout)
    }
}
