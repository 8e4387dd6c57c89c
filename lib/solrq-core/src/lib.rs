//! Core types and traits for the solrq Solr client.
//!
//! This crate holds everything that does not touch the network:
//! - [`Query`], [`QuerySpec`], [`ParamValue`] and [`FieldTerms`] - Query specs
//! - [`encode`] - Query spec to `?name=value&...` string
//! - [`ServerConfig`] - Host, port and core of the target Solr
//! - [`Request`] and [`Response`] - Transport-level request/response
//! - [`HttpClient`] - Transport trait
//! - [`docs`], [`into_docs`], [`docs_as`] - `response.docs` extraction
//! - [`Error`] and [`Result`] - Error handling

mod body;
mod client;
mod encode;
mod error;
pub mod prelude;
mod query;
mod request;
mod response;
mod server;

pub use body::{DOCS_POINTER, docs, docs_as, from_json, into_docs};
pub use client::{HttpClient, HttpClientExt};
pub use encode::encode;
pub use error::{Error, Result};
pub use query::{FieldTerms, ParamValue, Q, Query, QuerySpec};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use server::ServerConfig;
