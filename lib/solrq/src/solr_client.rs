//! Solr select client.
//!
//! [`SolrClient`] ties a transport to a [`ServerConfig`] and a set of default
//! parameters. Each call encodes the query over the defaults, appends it to
//! the core's select URL, issues one `GET` and decodes the JSON body.
//!
//! Configuration is plain state on the client: change it between calls with
//! [`SolrClient::server_mut`], [`SolrClient::defaults_mut`] and
//! [`SolrClient::set_verbose`].

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::{HttpClient, HyperClient, Query, QuerySpec, Request, Result, ServerConfig};

/// Client for one Solr core's select handler.
///
/// # Example
///
/// ```ignore
/// use solrq::{FieldTerms, QuerySpec, SolrClient};
///
/// let mut solr = SolrClient::builder().core("films").build();
///
/// let docs = solr.fetch_docs("genre:drama").await?;
///
/// solr.set_verbose(true);
/// let titles = solr
///     .map_docs(
///         QuerySpec::new().q(FieldTerms::new().field("directed_by", "Kubrick")),
///         |doc| doc["name"].clone(),
///     )
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct SolrClient<C = HyperClient> {
    http: C,
    server: ServerConfig,
    defaults: QuerySpec,
    verbose: bool,
}

impl SolrClient<HyperClient> {
    /// Client for the default server with the default transport.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> SolrClientBuilder<HyperClient> {
        SolrClientBuilder::new(HyperClient::new())
    }
}

impl Default for SolrClient<HyperClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> SolrClient<C> {
    /// Target server.
    #[must_use]
    pub const fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Mutable access to the target server.
    pub const fn server_mut(&mut self) -> &mut ServerConfig {
        &mut self.server
    }

    /// Default parameters merged under every query.
    #[must_use]
    pub const fn defaults(&self) -> &QuerySpec {
        &self.defaults
    }

    /// Mutable access to the default parameters.
    pub const fn defaults_mut(&mut self) -> &mut QuerySpec {
        &mut self.defaults
    }

    /// Whether constructed URLs are logged at `info` level.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Log constructed URLs at `info` level instead of `debug`.
    pub const fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Get a reference to the transport.
    #[must_use]
    pub const fn http(&self) -> &C {
        &self.http
    }

    /// Full select URL for a query.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingRequiredParameter`] if neither the query
    /// nor the defaults have a `q`.
    pub fn build_url(&self, query: impl Into<Query>) -> Result<String> {
        let params = crate::encode(query, &self.defaults)?;
        Ok(format!("{}{params}", self.server.base_url()))
    }
}

impl<C: HttpClient> SolrClient<C> {
    /// Fetch and decode the response body of a query.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::MissingRequiredParameter`] if there is no `q`
    /// - [`crate::Error::Http`] if Solr does not answer 200
    /// - [`crate::Error::JsonDeserialization`] if the body is not JSON
    /// - transport errors, unchanged
    pub async fn fetch_body(&self, query: impl Into<Query>) -> Result<Value> {
        let request = self.request(query, None)?;
        self.send(request).await
    }

    /// Like [`Self::fetch_body`], giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_body`], plus [`crate::Error::Timeout`].
    pub async fn fetch_body_with_timeout(
        &self,
        query: impl Into<Query>,
        timeout: Duration,
    ) -> Result<Value> {
        let request = self.request(query, Some(timeout))?;
        self.send(request).await
    }

    /// Fetch the body and hand it to `f`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_body`].
    pub async fn with_body<R>(
        &self,
        query: impl Into<Query>,
        f: impl FnOnce(Value) -> R,
    ) -> Result<R> {
        let body = self.fetch_body(query).await?;
        Ok(f(body))
    }

    /// Fetch `response.docs` of a query.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_body`], plus [`crate::Error::MalformedResponse`]
    /// if the body has no `response.docs` array.
    pub async fn fetch_docs(&self, query: impl Into<Query>) -> Result<Vec<Value>> {
        let body = self.fetch_body(query).await?;
        crate::into_docs(body)
    }

    /// Fetch `response.docs` of a query as typed documents.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_docs`], plus [`crate::Error::JsonDeserialization`]
    /// if a document does not fit `T`.
    pub async fn fetch_docs_as<T: serde::de::DeserializeOwned>(
        &self,
        query: impl Into<Query>,
    ) -> Result<Vec<T>> {
        let body = self.fetch_body(query).await?;
        crate::docs_as(body)
    }

    /// Call `visit` on each document, in order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_docs`].
    pub async fn for_each_doc(
        &self,
        query: impl Into<Query>,
        visit: impl FnMut(&Value),
    ) -> Result<()> {
        let body = self.fetch_body(query).await?;
        crate::docs(&body)?.iter().for_each(visit);
        Ok(())
    }

    /// Transform each document, keeping document order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_docs`].
    pub async fn map_docs<R>(
        &self,
        query: impl Into<Query>,
        f: impl FnMut(Value) -> R,
    ) -> Result<Vec<R>> {
        let docs = self.fetch_docs(query).await?;
        Ok(docs.into_iter().map(f).collect())
    }

    /// Call `visit` on each document and collect what it returns.
    ///
    /// Returns `None` when every call returned `None`, so a visitor used only
    /// for its side effects yields nothing. Otherwise every result is kept,
    /// `None`s included, in document order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_docs`].
    pub async fn visit_docs<R>(
        &self,
        query: impl Into<Query>,
        visit: impl FnMut(&Value) -> Option<R>,
    ) -> Result<Option<Vec<Option<R>>>> {
        let body = self.fetch_body(query).await?;
        let results: Vec<Option<R>> = crate::docs(&body)?.iter().map(visit).collect();
        Ok(results.iter().any(Option::is_some).then_some(results))
    }

    fn request(&self, query: impl Into<Query>, timeout: Option<Duration>) -> Result<Request> {
        let url = self.build_url(query)?;
        if self.verbose {
            info!(%url, "loading");
        } else {
            debug!(%url, "loading");
        }

        let builder = Request::builder(url::Url::parse(&url)?);
        Ok(match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        }
        .build())
    }

    async fn send(&self, request: Request) -> Result<Value> {
        self.http.execute(request).await?.into_select_body()
    }
}

/// Builder for [`SolrClient`].
#[derive(Debug, Clone)]
pub struct SolrClientBuilder<C> {
    http: C,
    server: ServerConfig,
    defaults: QuerySpec,
    verbose: bool,
}

impl<C> SolrClientBuilder<C> {
    /// Start from a transport, the default server and the explain defaults.
    #[must_use]
    pub fn new(http: C) -> Self {
        Self {
            http,
            server: ServerConfig::default(),
            defaults: QuerySpec::explain_defaults(),
            verbose: false,
        }
    }

    /// Use another transport.
    #[must_use]
    pub fn http<C2>(self, http: C2) -> SolrClientBuilder<C2> {
        SolrClientBuilder {
            http,
            server: self.server,
            defaults: self.defaults,
            verbose: self.verbose,
        }
    }

    /// Set the whole server configuration.
    #[must_use]
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }

    /// Set the host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.server.host = host.into();
        self
    }

    /// Set the port.
    #[must_use]
    pub fn port(mut self, port: impl ToString) -> Self {
        self.server.port = port.to_string();
        self
    }

    /// Set the core.
    #[must_use]
    pub fn core(mut self, core: impl Into<String>) -> Self {
        self.server.core = core.into();
        self
    }

    /// Replace the default parameters.
    #[must_use]
    pub fn defaults(mut self, defaults: QuerySpec) -> Self {
        self.defaults = defaults;
        self
    }

    /// Log constructed URLs at `info` level.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build the client.
    #[must_use]
    pub fn build(self) -> SolrClient<C> {
        SolrClient {
            http: self.http,
            server: self.server,
            defaults: self.defaults,
            verbose: self.verbose,
        }
    }
}
