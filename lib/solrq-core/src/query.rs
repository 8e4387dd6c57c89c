//! Query spec types.
//!
//! A [`QuerySpec`] is an ordered map from Solr parameter name to [`ParamValue`].
//! Insertion order is kept so the encoded query string is stable.
//!
//! # Example
//!
//! ```
//! use solrq_core::{FieldTerms, Query, QuerySpec};
//!
//! let spec = QuerySpec::new()
//!     .q(FieldTerms::new().field("title", "dogs").term("cats"))
//!     .param("rows", 10)
//!     .param("fq", ["year:2020", "lang:en"]);
//!
//! let query = Query::from(spec);
//! assert!(query.spec().contains("q"));
//! ```

use serde_json::Value;

use crate::{Error, Result};

/// Name of the mandatory query parameter.
pub const Q: &str = "q";

// ============================================================================
// Field Terms
// ============================================================================

/// Ordered field→term clauses of a structured `q` value.
///
/// An empty field name stands for the default field: the term is emitted
/// without a `field:` qualifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTerms {
    clauses: Vec<(String, String)>,
}

impl FieldTerms {
    /// Creates an empty clause list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the term for a field.
    ///
    /// A field that is already present keeps its position and gets the new term.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, term: impl Into<String>) -> Self {
        self.insert(name, term);
        self
    }

    /// Sets the term matched against the default field.
    #[must_use]
    pub fn term(self, term: impl Into<String>) -> Self {
        self.field("", term)
    }

    /// Sets the term for a field in place.
    pub fn insert(&mut self, name: impl Into<String>, term: impl Into<String>) {
        let name = name.into();
        let term = term.into();
        match self.clauses.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = term,
            None => self.clauses.push((name, term)),
        }
    }

    /// Clauses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.clauses
            .iter()
            .map(|(field, term)| (field.as_str(), term.as_str()))
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns `true` if there are no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldTerms
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut terms = Self::new();
        for (field, term) in iter {
            terms.insert(field, term);
        }
        terms
    }
}

// ============================================================================
// Parameter Value
// ============================================================================

/// Value of a single query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A scalar, emitted as one `name=value` pair.
    Single(String),
    /// A sequence, emitted as one `name=value` pair per element.
    Multi(Vec<String>),
    /// Field→term clauses, only meaningful for `q`.
    Fields(FieldTerms),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(bool, i32, i64, u32, u64, usize, f32, f64);

impl<T: Into<String>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<String>, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        Self::Multi(values.into_iter().map(Into::into).collect())
    }
}

impl From<FieldTerms> for ParamValue {
    fn from(terms: FieldTerms) -> Self {
        Self::Fields(terms)
    }
}

// ============================================================================
// Query Spec
// ============================================================================

/// Ordered map of Solr query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    entries: Vec<(String, ParamValue)>,
}

impl QuerySpec {
    /// Creates an empty spec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults suited to exploring relevance interactively: extended dismax,
    /// full debug output and an explanation attached to every document.
    #[must_use]
    pub fn explain_defaults() -> Self {
        Self::new()
            .param("defType", "edismax")
            .param("debug", "all")
            .param("wt", "json")
            .param("indent", "true")
            .param("fl", "*,[explain]")
    }

    /// Sets a parameter, keeping its position if it is already present.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets the `q` parameter.
    #[must_use]
    pub fn q(self, value: impl Into<ParamValue>) -> Self {
        self.param(Q, value)
    }

    /// Sets a parameter in place, keeping its position if it is already present.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow merge of `self` over `defaults`.
    ///
    /// Every default keeps its position; a key present in both takes the
    /// value from `self` wholesale. Keys only present in `self` are appended
    /// in their own order.
    #[must_use]
    pub fn merged_over(&self, defaults: &Self) -> Self {
        let mut merged = defaults.clone();
        for (name, value) in &self.entries {
            merged.set(name.clone(), value.clone());
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for QuerySpec
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut spec = Self::new();
        for (name, value) in iter {
            spec.set(name, value);
        }
        spec
    }
}

// ============================================================================
// Query
// ============================================================================

/// A query as given by the caller: either a bare query string or a full spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Shorthand for a spec holding only `q`.
    Plain(String),
    /// A full parameter map.
    Structured(QuerySpec),
}

impl Query {
    /// Resolve into a parameter map.
    #[must_use]
    pub fn into_spec(self) -> QuerySpec {
        match self {
            Self::Plain(q) => QuerySpec::new().q(q),
            Self::Structured(spec) => spec,
        }
    }

    /// Parameter map view of this query.
    #[must_use]
    pub fn spec(&self) -> QuerySpec {
        self.clone().into_spec()
    }
}

impl From<&str> for Query {
    fn from(q: &str) -> Self {
        Self::Plain(q.to_string())
    }
}

impl From<String> for Query {
    fn from(q: String) -> Self {
        Self::Plain(q)
    }
}

impl From<&String> for Query {
    fn from(q: &String) -> Self {
        Self::Plain(q.clone())
    }
}

impl From<QuerySpec> for Query {
    fn from(spec: QuerySpec) -> Self {
        Self::Structured(spec)
    }
}

impl From<&QuerySpec> for Query {
    fn from(spec: &QuerySpec) -> Self {
        Self::Structured(spec.clone())
    }
}

// ============================================================================
// JSON conversion
// ============================================================================

impl TryFrom<Value> for Query {
    type Error = Error;

    /// Read a query from JSON.
    ///
    /// A string is a plain query. An object maps parameter names to
    /// scalars or arrays of scalars; `q` may also be an object of
    /// field→term clauses. Object key order is preserved.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(q) => Ok(Self::Plain(q)),
            Value::Object(map) => {
                let mut spec = QuerySpec::new();
                for (name, value) in map {
                    let value = param_from_json(&name, value)?;
                    spec.set(name, value);
                }
                Ok(Self::Structured(spec))
            }
            other => Err(Error::invalid_query_spec(format!(
                "expected a string or an object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl std::str::FromStr for Query {
    type Err = Error;

    /// Parse a JSON query spec; anything that does not open a JSON object
    /// is a plain query.
    ///
    /// Solr local params (`{!edismax qf=title}dogs`) start with `{` too, so
    /// only `{` followed by a key or `}` is read as JSON.
    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if opens_json_object(trimmed) {
            let value: Value = serde_json::from_str(trimmed)?;
            Self::try_from(value)
        } else {
            Ok(Self::Plain(trimmed.to_string()))
        }
    }
}

fn opens_json_object(input: &str) -> bool {
    input
        .strip_prefix('{')
        .and_then(|rest| rest.trim_start().chars().next())
        .is_some_and(|next| next == '"' || next == '}')
}

fn param_from_json(name: &str, value: Value) -> Result<ParamValue> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| {
                scalar_from_json(&item).ok_or_else(|| {
                    Error::invalid_query_spec(format!(
                        "'{name}' items must be scalars, got {}",
                        json_kind(&item)
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(ParamValue::Multi),
        Value::Object(map) if name == Q => map
            .into_iter()
            .map(|(field, term)| {
                scalar_from_json(&term)
                    .map(|term| (field.clone(), term))
                    .ok_or_else(|| {
                        Error::invalid_query_spec(format!(
                            "term for field '{field}' must be a scalar, got {}",
                            json_kind(&term)
                        ))
                    })
            })
            .collect::<Result<FieldTerms>>()
            .map(ParamValue::Fields),
        other => scalar_from_json(&other).map(ParamValue::Single).ok_or_else(|| {
            Error::invalid_query_spec(format!(
                "'{name}' must be a scalar or an array, got {}",
                json_kind(&other)
            ))
        }),
    }
}

fn scalar_from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
