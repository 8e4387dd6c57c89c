//! Solr server identity.

use derive_more::Display;

/// Host, port and core of the Solr instance to query.
///
/// No validation is performed: the values are pasted into the select URL.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{host}:{port}/{core}")]
pub struct ServerConfig {
    /// Host name or address.
    pub host: String,
    /// Port, kept as text.
    pub port: String,
    /// Core (or collection) name.
    pub core: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("localhost", "8983", "books")
    }
}

impl ServerConfig {
    /// Creates a server configuration.
    #[must_use]
    pub fn new(host: impl Into<String>, port: impl ToString, core: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.to_string(),
            core: core.into(),
        }
    }

    /// URL of the core's select handler, without a query string.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "http://{}:{}/solr/{}/select",
            self.host, self.port, self.core
        )
    }
}
