//! Query string encoding.
//!
//! Values are written as given: nothing is percent-encoded here. A caller that
//! needs a literal `&`, `=` or `#` inside a value must pre-encode it.

use crate::query::{FieldTerms, ParamValue, Q, Query, QuerySpec};
use crate::{Error, Result};

/// Encode a query into a `?name=value&...` string.
///
/// The query is merged over `defaults` (see [`QuerySpec::merged_over`]) and
/// must have a `q` parameter afterwards.
///
/// - A [`ParamValue::Multi`] emits one pair per element, in order.
/// - A [`ParamValue::Fields`] under `q` emits a single `q=` pair whose clauses
///   are joined by a space; a clause with an empty field name is a bare term.
/// - Anything else emits `name=value`.
///
/// # Errors
///
/// Returns [`Error::MissingRequiredParameter`] if there is no `q` after merging,
/// and [`Error::InvalidRequest`] if field clauses are used for another parameter.
///
/// # Example
///
/// ```
/// use solrq_core::{FieldTerms, QuerySpec, encode};
///
/// let defaults = QuerySpec::new().param("wt", "json");
/// let spec = QuerySpec::new()
///     .q(FieldTerms::new().field("title", "dogs").term("cats"))
///     .param("fq", ["a", "b"]);
///
/// let query = encode(spec, &defaults).expect("encode");
/// assert_eq!(query, "?wt=json&q=title:dogs cats&fq=a&fq=b");
/// ```
pub fn encode(query: impl Into<Query>, defaults: &QuerySpec) -> Result<String> {
    let merged = query.into().into_spec().merged_over(defaults);

    if !merged.contains(Q) {
        return Err(Error::missing_parameter(Q));
    }

    let mut pairs = Vec::with_capacity(merged.len());
    for (name, value) in merged.iter() {
        match value {
            ParamValue::Multi(values) => {
                pairs.extend(values.iter().map(|value| format!("{name}={value}")));
            }
            ParamValue::Fields(terms) if name == Q => {
                pairs.push(format!("{name}={}", join_clauses(terms)));
            }
            ParamValue::Fields(_) => {
                return Err(Error::invalid_request(format!(
                    "field clauses are only supported for '{Q}', not '{name}'"
                )));
            }
            ParamValue::Single(value) => pairs.push(format!("{name}={value}")),
        }
    }

    Ok(format!("?{}", pairs.join("&")))
}

fn join_clauses(terms: &FieldTerms) -> String {
    terms
        .iter()
        .map(|(field, term)| {
            if field.is_empty() {
                term.to_string()
            } else {
                format!("{field}:{term}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn plain_string_is_q_sugar() {
        let defaults = QuerySpec::explain_defaults();
        let plain = encode("dogs", &defaults).expect("encode");
        let structured = encode(QuerySpec::new().q("dogs"), &defaults).expect("encode");
        check!(plain == structured);
    }

    #[test]
    fn plain_string_without_defaults() {
        let encoded = encode("title:dogs", &QuerySpec::new()).expect("encode");
        insta::assert_snapshot!(encoded, @"?q=title:dogs");
    }

    #[test]
    fn missing_q_fails() {
        let spec = QuerySpec::new().param("rows", 10);
        let_assert!(
            Err(Error::MissingRequiredParameter { name }) =
                encode(spec, &QuerySpec::explain_defaults())
        );
        check!(name == "q");
    }

    #[test]
    fn q_from_defaults_survives() {
        let defaults = QuerySpec::new().q("*:*");
        let encoded = encode(QuerySpec::new().param("rows", 0), &defaults).expect("encode");
        check!(encoded == "?q=*:*&rows=0");
    }

    #[test]
    fn defaults_merge_shallow_caller_wins() {
        let defaults = QuerySpec::new().param("wt", "json").param("indent", "true");
        let spec = QuerySpec::new().q("a").param("wt", "xml");

        let encoded = encode(spec, &defaults).expect("encode");

        check!(encoded == "?wt=xml&indent=true&q=a");
        check!(!encoded.contains("wt=json"));
    }

    #[test]
    fn explain_defaults_layout() {
        let encoded = encode("dogs", &QuerySpec::explain_defaults()).expect("encode");
        insta::assert_snapshot!(
            encoded,
            @"?defType=edismax&debug=all&wt=json&indent=true&fl=*,[explain]&q=dogs"
        );
    }

    #[test]
    fn structured_q_is_a_single_pair() {
        let spec = QuerySpec::new().q(FieldTerms::new().field("title", "dogs").term("cats"));
        let encoded = encode(spec, &QuerySpec::new()).expect("encode");
        check!(encoded == "?q=title:dogs cats");
        check!(encoded.matches("q=").count() == 1);
    }

    #[test]
    fn structured_q_bare_term_first() {
        let spec = QuerySpec::new().q(FieldTerms::new().term("cats").field("title", "dogs"));
        let encoded = encode(spec, &QuerySpec::new()).expect("encode");
        check!(encoded == "?q=cats title:dogs");
    }

    #[test]
    fn empty_structured_q() {
        let encoded = encode(QuerySpec::new().q(FieldTerms::new()), &QuerySpec::new())
            .expect("encode");
        check!(encoded == "?q=");
    }

    #[test]
    fn sequence_values_repeat_in_order() {
        let spec = QuerySpec::new().q("x").param("fq", ["a", "b"]);
        let encoded = encode(spec, &QuerySpec::new()).expect("encode");
        check!(encoded == "?q=x&fq=a&fq=b");
    }

    #[test]
    fn sequence_q_repeats() {
        let spec = QuerySpec::new().q(vec!["a", "b"]);
        let encoded = encode(spec, &QuerySpec::new()).expect("encode");
        check!(encoded == "?q=a&q=b");
    }

    #[test]
    fn empty_sequence_emits_nothing() {
        let spec = QuerySpec::new().q("x").param("fq", Vec::<String>::new());
        let encoded = encode(spec, &QuerySpec::new()).expect("encode");
        check!(encoded == "?q=x");
    }

    #[test]
    fn values_are_not_escaped() {
        let spec = QuerySpec::new().q("a b&c=d").param("fl", "id,score");
        let encoded = encode(spec, &QuerySpec::new()).expect("encode");
        check!(encoded == "?q=a b&c=d&fl=id,score");
    }

    #[test]
    fn field_clauses_rejected_outside_q() {
        let spec = QuerySpec::new()
            .q("x")
            .param("fq", FieldTerms::new().field("year", "2020"));
        let_assert!(Err(Error::InvalidRequest(message)) = encode(spec, &QuerySpec::new()));
        check!(message.contains("'fq'"));
    }

    #[test]
    fn numeric_and_boolean_scalars() {
        let spec = QuerySpec::new()
            .q("x")
            .param("rows", 25)
            .param("start", 50_u64)
            .param("facet", true);
        let encoded = encode(spec, &QuerySpec::new()).expect("encode");
        check!(encoded == "?q=x&rows=25&start=50&facet=true");
    }
}
