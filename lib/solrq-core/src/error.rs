//! Error types for solrq.

use derive_more::{Display, Error, From};

/// Main error type for solrq operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A required query parameter is absent after merging defaults.
    #[display("query spec needs a '{name}' value")]
    #[from(skip)]
    MissingRequiredParameter {
        /// Parameter name.
        #[error(not(source))]
        name: String,
    },

    /// Solr answered with a status other than 200.
    #[display("HTTP error {status}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, if available.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// A JSON value could not be read as a query spec.
    #[display("invalid query spec: {_0}")]
    #[from(skip)]
    InvalidQuerySpec(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "response.docs[0].id").
        path: String,
        /// Error message.
        message: String,
    },

    /// The parsed body does not have the expected shape.
    #[display("malformed response: missing '{path}'")]
    #[from(skip)]
    MalformedResponse {
        /// JSON pointer of the missing member.
        #[error(not(source))]
        path: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a missing parameter error.
    #[must_use]
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingRequiredParameter { name: name.into() }
    }

    /// Create an HTTP error from a status code.
    #[must_use]
    pub const fn http(status: u16) -> Self {
        Self::Http { status, body: None }
    }

    /// Create an HTTP error with body.
    #[must_use]
    pub fn http_with_body(status: u16, body: bytes::Bytes) -> Self {
        Self::Http {
            status,
            body: Some(body),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an invalid query spec error.
    #[must_use]
    pub fn invalid_query_spec(message: impl Into<String>) -> Self {
        Self::InvalidQuerySpec(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a malformed response error.
    #[must_use]
    pub fn malformed_response(path: impl Into<String>) -> Self {
        Self::MalformedResponse { path: path.into() }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the failure came from the transport itself
    /// (connection refused, reset, timeout).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout)
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the response body if this is an HTTP error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Try to decode the HTTP error body as JSON.
    ///
    /// Solr reports failures such as an unknown field as a JSON document with
    /// an `error` member, so this is usually the most useful way to show why
    /// a query was rejected.
    ///
    /// Returns `None` if there is no body or this is not an HTTP error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}
