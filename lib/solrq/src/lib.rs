//! Small async client for a Solr core's select handler.
//!
//! Describe a query as a plain string or a [`QuerySpec`], let [`SolrClient`]
//! merge it over its default parameters, and get back the JSON body or just
//! the documents.
//!
//! # Example
//!
//! ```ignore
//! use solrq::prelude::*;
//!
//! let solr = SolrClient::builder()
//!     .host("localhost")
//!     .port(8983)
//!     .core("books")
//!     .build();
//!
//! // Plain query string
//! let docs = solr.fetch_docs("cat:electronics").await?;
//!
//! // Structured query: one `q=` pair, repeated `fq=` pairs
//! let spec = QuerySpec::new()
//!     .q(FieldTerms::new().field("title", "dogs").term("cats"))
//!     .param("fq", ["inStock:true", "price:[0 TO 20]"]);
//! solr.for_each_doc(spec, |doc| tracing::info!(%doc)).await?;
//! ```
//!
//! Values are not URL-encoded: `&`, `=` and `#` inside a value must be
//! pre-encoded by the caller.

mod client;
mod config;
pub mod middleware;
pub mod prelude;
mod solr_client;

pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::ClientConfig;
pub use solr_client::{SolrClient, SolrClientBuilder};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use solrq_core::{
    DOCS_POINTER, Error, FieldTerms, HttpClient, HttpClientExt, ParamValue, Q, Query, QuerySpec,
    Request, RequestBuilder, Response, Result, ServerConfig, docs, docs_as, encode, from_json,
    into_docs,
};
