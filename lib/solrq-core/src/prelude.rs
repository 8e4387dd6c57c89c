//! Prelude module for convenient imports.
//!
//! ```ignore
//! use solrq_core::prelude::*;
//! ```

pub use crate::{
    Error, FieldTerms, HttpClient, HttpClientExt, ParamValue, Query, QuerySpec, Request, Response,
    Result, ServerConfig, encode, from_json,
};
