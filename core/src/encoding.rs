//! Wire-format helpers: percent-encoding, query strings and joined names.
//!
//! The service expects list-valued query parameters as repeated `key=value`
//! pairs and batch dirent names as a single colon-joined value. Both are
//! fixed by the server and reproduced here as-is.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped by `encode_component`: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a single path segment or query value. `/` is escaped.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Value of a query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

/// Serializes query parameters as `k=v&k=v`.
///
/// Keys are written verbatim. Each value is percent-encoded once; list
/// values expand to one pair per element in their original order.
pub fn serialize_query(params: &[(String, QueryValue)]) -> String {
    let mut pairs = Vec::new();
    for (key, value) in params {
        match value {
            QueryValue::Scalar(v) => pairs.push(format!("{key}={}", encode_component(v))),
            QueryValue::List(items) => {
                pairs.extend(items.iter().map(|v| format!("{key}={}", encode_component(v))));
            }
        }
    }
    pairs.join("&")
}

/// Joins batch dirent names with `:`.
///
/// Names are not escaped; a name that itself contains `:` cannot be told
/// apart from two names on the server side.
pub fn colon_join<S: AsRef<str>>(names: &[S]) -> String {
    names.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_encoding_matches_uri_component_rules() {
        assert_eq!(encode_component("/a b/c.md"), "%2Fa%20b%2Fc.md");
        assert_eq!(encode_component("it's(1)!~*"), "it's(1)!~*");
        assert_eq!(encode_component("a&b=c?d#e"), "a%26b%3Dc%3Fd%23e");
        assert_eq!(encode_component("文件"), "%E6%96%87%E4%BB%B6");
    }

    #[test]
    fn list_query_repeats_key_per_element() {
        let params = vec![(
            "type".to_string(),
            QueryValue::List(vec!["mine".into(), "shared".into(), "group public".into()]),
        )];
        let query = serialize_query(&params);
        assert_eq!(query, "type=mine&type=shared&type=group%20public");
        assert_eq!(query.matches("type=").count(), 3);
        assert!(!query.contains("type[]"));
        assert!(!query.contains(','));
    }

    #[test]
    fn mixed_query_keeps_insertion_order() {
        let params = vec![
            ("p".to_string(), QueryValue::Scalar("/docs/a&b".into())),
            ("t".to_string(), QueryValue::List(vec!["d".into()])),
            ("with_thumbnail".to_string(), QueryValue::Scalar("true".into())),
        ];
        assert_eq!(serialize_query(&params), "p=%2Fdocs%2Fa%26b&t=d&with_thumbnail=true");
    }

    #[test]
    fn empty_list_contributes_nothing() {
        let params = vec![
            ("type".to_string(), QueryValue::List(Vec::new())),
            ("page".to_string(), QueryValue::Scalar("2".into())),
        ];
        assert_eq!(serialize_query(&params), "page=2");
    }

    #[test]
    fn colon_join_keeps_names_unescaped() {
        assert_eq!(colon_join(&["a.txt", "b dir", "c%d"]), "a.txt:b dir:c%d");
        assert_eq!(colon_join(&["only"]), "only");
        assert_eq!(colon_join::<&str>(&[]), "");
    }
}
