//! HTTP request building.
//!
//! Every Solr select call is a `GET` without a body, so a [`Request`] is a
//! URL, a few headers and an optional per-request timeout.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use solrq_core::Request;
//!
//! let request = Request::builder("http://localhost:8983/solr/books/select?q=*:*".parse().expect("valid URL"))
//!     .header("Accept", "application/json")
//!     .timeout(Duration::from_secs(4))
//!     .build();
//! assert_eq!(request.timeout(), Some(Duration::from_secs(4)));
//! ```

use std::collections::HashMap;
use std::time::Duration;

/// An HTTP `GET` request.
#[derive(Debug, Clone)]
pub struct Request {
    url: url::Url,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(url: url::Url) -> RequestBuilder {
        RequestBuilder::new(url)
    }

    /// Parse `url` into a request with no headers.
    ///
    /// Characters that cannot appear in a URL query (spaces, quotes, angle
    /// brackets) are percent-encoded by the parser; `&`, `=` and `:` are kept.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidUrl`] if the URL cannot be parsed.
    pub fn get(url: &str) -> crate::Result<Self> {
        Ok(Self::builder(url::Url::parse(url)?).build())
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Timeout for this request, overriding the transport default.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Consume into (url, headers, timeout).
    #[must_use]
    pub fn into_parts(self) -> (url::Url, HashMap<String, String>, Option<Duration>) {
        (self.url, self.headers, self.timeout)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: url::Url,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(url: url::Url) -> Self {
        Self {
            url,
            headers: HashMap::new(),
            timeout: None,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            url: self.url,
            headers: self.headers,
            timeout: self.timeout,
        }
    }
}
