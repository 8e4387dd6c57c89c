//! HTTP response handling.
//!
//! [`Response`] is what the transport hands back: status, headers and the
//! fully buffered body. [`Response::into_select_body`] applies the select
//! handler's contract (status 200 and a JSON body).
//!
//! # Example
//!
//! ```ignore
//! let body: serde_json::Value = response.into_select_body()?;
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Error, Result};

/// Buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers, names lowercased by the transport.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Status is exactly 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Deserialize the response body as JSON, whatever the status.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Decode a select response.
    ///
    /// Only status 200 counts as success; any other status, 2xx included,
    /// is an [`Error::Http`] carrying the status and the raw body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on a non-200 status, or
    /// [`Error::JsonDeserialization`] if the body is not valid JSON for `T`.
    pub fn into_select_body<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        if self.is_ok() {
            crate::from_json(&self.body)
        } else {
            Err(Error::http_with_body(self.status, self.body))
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        let response = Response::new(200, headers, r#"{"id":1}"#);

        check!(response.status() == 200);
        check!(response.header("content-type") == Some("application/json"));
        check!(response.is_ok());
        check!(response.is_success());
    }

    #[test]
    fn select_body_ok() {
        let response = Response::new(
            200,
            HashMap::new(),
            r#"{"response":{"docs":[{"id":1}]}}"#,
        );

        let_assert!(Ok(body) = response.into_select_body::<Value>());
        check!(body == json!({"response": {"docs": [{"id": 1}]}}));
    }

    #[test]
    fn select_body_not_found() {
        let response = Response::new(404, HashMap::new(), "Not Found");

        let_assert!(Err(err) = response.into_select_body::<Value>());
        check!(err.status() == Some(404));
        check!(err.body().map(Bytes::as_ref) == Some(b"Not Found".as_slice()));
    }

    #[test]
    fn select_body_only_200_is_success() {
        let response = Response::new(204, HashMap::new(), Bytes::new());
        check!(response.is_success());
        check!(!response.is_ok());

        let_assert!(Err(Error::Http { status: 204, .. }) = response.into_select_body::<Value>());
    }

    #[test]
    fn select_body_invalid_json() {
        let response = Response::new(200, HashMap::new(), "<html>");
        let_assert!(Err(Error::JsonDeserialization { .. }) = response.into_select_body::<Value>());
    }

    #[test]
    fn response_text() {
        let response = Response::new(200, HashMap::new(), "Hello, Solr!");
        check!(response.text().expect("text") == "Hello, Solr!");
    }
}
