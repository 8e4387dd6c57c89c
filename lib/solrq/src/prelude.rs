//! Prelude module for convenient imports.
//!
//! ```ignore
//! use solrq::prelude::*;
//! ```

pub use crate::{
    ClientConfig, Error, FieldTerms, HttpClient, HyperClient, ParamValue, Query, QuerySpec, Result,
    ServerConfig, SolrClient,
};
pub use serde::Deserialize;
