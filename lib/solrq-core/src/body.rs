//! Response body decoding.

use serde_json::Value;

use crate::{Error, Result};

/// JSON pointer of the document list in a select response.
pub const DOCS_POINTER: &str = "/response/docs";

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so the error names the exact field that failed
/// (e.g. `response.docs[3].price`).
///
/// # Example
///
/// ```
/// use solrq_core::from_json;
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct Book { id: String }
///
/// let bytes = br#"{"id":"978-0641723445"}"#;
/// let book: Book = from_json(bytes).expect("deserialize");
/// assert_eq!(book, Book { id: "978-0641723445".to_string() });
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Borrow the documents of a parsed select response.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if `response.docs` is absent or is
/// not an array.
pub fn docs(body: &Value) -> Result<&[Value]> {
    body.pointer(DOCS_POINTER)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| Error::malformed_response(DOCS_POINTER))
}

/// Take the documents out of a parsed select response.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if `response.docs` is absent or is
/// not an array.
pub fn into_docs(mut body: Value) -> Result<Vec<Value>> {
    match body.pointer_mut(DOCS_POINTER).map(Value::take) {
        Some(Value::Array(docs)) => Ok(docs),
        _ => Err(Error::malformed_response(DOCS_POINTER)),
    }
}

/// Deserialize the documents of a parsed select response.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if `response.docs` is missing, or
/// [`Error::JsonDeserialization`] if a document does not fit `T`.
pub fn docs_as<T: serde::de::DeserializeOwned>(body: Value) -> Result<Vec<T>> {
    let docs = Value::Array(into_docs(body)?);
    serde_path_to_error::deserialize(docs).map_err(|e| {
        Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;

    #[test]
    fn docs_borrowed() {
        let body = json!({"response": {"numFound": 1, "docs": [{"id": 1}]}});
        let_assert!(Ok(found) = docs(&body));
        check!(found == [json!({"id": 1})]);
    }

    #[test]
    fn docs_owned() {
        let body = json!({"response": {"docs": [{"id": 1}, {"id": 2}]}});
        let_assert!(Ok(found) = into_docs(body));
        check!(found == vec![json!({"id": 1}), json!({"id": 2})]);
    }

    #[test]
    fn docs_missing() {
        let body = json!({"responseHeader": {"status": 0}});
        let_assert!(Err(Error::MalformedResponse { path }) = docs(&body));
        check!(path == DOCS_POINTER);

        let_assert!(Err(Error::MalformedResponse { .. }) = into_docs(body));
    }

    #[test]
    fn docs_not_an_array() {
        let body = json!({"response": {"docs": {"id": 1}}});
        let_assert!(Err(Error::MalformedResponse { .. }) = docs(&body));
        let_assert!(Err(Error::MalformedResponse { .. }) = into_docs(body));
    }

    #[test]
    fn typed_docs() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Book {
            id: String,
            price: f64,
        }

        let body = json!({"response": {"docs": [{"id": "a", "price": 1.5}]}});
        let_assert!(Ok(books) = docs_as::<Book>(body));
        check!(
            books
                == vec![Book {
                    id: "a".to_string(),
                    price: 1.5
                }]
        );
    }

    #[test]
    fn typed_docs_error_has_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Book {
            #[allow(dead_code)]
            price: f64,
        }

        let body = json!({"response": {"docs": [{"price": 1.0}, {"price": "free"}]}});
        let_assert!(Err(Error::JsonDeserialization { path, .. }) = docs_as::<Book>(body));
        check!(path.contains("[1]"));
        check!(path.contains("price"));
    }

    #[test]
    fn from_json_syntax_error() {
        let result: Result<Value> = from_json(b"not json");
        let_assert!(Err(Error::JsonDeserialization { .. }) = result);
    }
}
