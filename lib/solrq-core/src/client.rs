//! Transport traits.
//!
//! [`HttpClient`] is the seam between query building and the network.
//! `solrq` ships a hyper-based implementation; tests and embedders can plug
//! in their own.

use std::future::Future;

use crate::{Request, Response, Result};

/// Core HTTP transport trait.
///
/// An implementation performs one `GET` and buffers the whole body. It must
/// not interpret the status code: a 404 is an `Ok` response here.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails before a response is read:
    /// - Connection errors
    /// - Timeouts
    /// - Invalid response framing
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

/// Extension trait for [`HttpClient`] with convenience methods.
pub trait HttpClientExt: HttpClient {
    /// Execute a GET request for a URL string.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the request fails.
    fn get(&self, url: &str) -> impl Future<Output = Result<Response>> + Send {
        async move {
            let request = Request::get(url)?;
            self.execute(request).await
        }
    }
}

// Blanket implementation for all HttpClient implementors
impl<T: HttpClient> HttpClientExt for T {}

impl<T: HttpClient> HttpClient for &T {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}
