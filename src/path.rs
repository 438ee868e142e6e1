// src/path.rs

//! Dotted-path navigation over a parsed JSON document.
//!
//! A path such as `"results.0.components.city"` is split on `.`. A segment made
//! up only of ASCII digits addresses an array element, anything else addresses
//! an object member. Lookups never fail loudly: a missing node, a type mismatch
//! or a JSON `null` all come back as `None`.

use serde::de::DeserializeOwned;
use serde_json::Value;

const SEPARATOR: char = '.';

/// How a single path segment addresses its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Index(usize),
    Key(&'a str),
}

impl<'a> Segment<'a> {
    // A digit-only segment too large for usize is not an index; it falls back
    // to an object key lookup.
    fn parse(raw: &'a str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = raw.parse::<usize>() {
                return Segment::Index(index);
            }
        }
        Segment::Key(raw)
    }
}

/// Resolves `path` against `root`.
///
/// Returns `None` for an empty path or when any segment cannot be resolved.
/// A resolved JSON `null` is returned as `Some(&Value::Null)`; the typed
/// accessors below treat it as absent.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.split(SEPARATOR)
        .try_fold(root, |current, raw| match Segment::parse(raw) {
            Segment::Index(index) => current.as_array()?.get(index),
            Segment::Key(key) => current.as_object()?.get(key),
        })
}

fn lookup_non_null<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    lookup(root, path).filter(|v| !v.is_null())
}

/// String value at `path`, if present and a JSON string.
pub fn get_str<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    lookup_non_null(root, path)?.as_str()
}

/// Integer value at `path`, if present and a JSON number.
///
/// Floating-point numbers are truncated toward zero (saturating at the `i64`
/// bounds).
pub fn get_int(root: &Value, path: &str) -> Option<i64> {
    let value = lookup_non_null(root, path)?;
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
        .or_else(|| value.as_f64().map(|f| f as i64))
}

/// Floating-point value at `path`, if present and a JSON number.
pub fn get_double(root: &Value, path: &str) -> Option<f64> {
    lookup_non_null(root, path)?.as_f64()
}

/// Deserializes the subtree at `path` into `T`.
///
/// Returns `None` when the path does not resolve, resolves to `null`, or the
/// subtree does not fit `T`.
pub fn get_as<T: DeserializeOwned>(root: &Value, path: &str) -> Option<T> {
    lookup_non_null(root, path).and_then(|value| serde_json::from_value(value.clone()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "results": [
                {
                    "components": {
                        "city": "London",
                        "postcode": null,
                        "ISO_3166-1_alpha-2": "GB"
                    },
                    "confidence": 9,
                    "geometry": { "lat": 51.5007, "lng": -0.1246 },
                    "annotations": { "callingcode": 44, "timestamp": { "created_unix": 1.5e9 } }
                }
            ],
            "99999999999999999999999": "big key",
            "": { "": "empty keys" }
        })
    }

    #[test]
    fn resolves_index_and_keys() {
        let doc = sample();
        assert_eq!(
            lookup(&doc, "results.0.components.city"),
            Some(&json!("London"))
        );
        assert_eq!(get_str(&doc, "results.0.components.ISO_3166-1_alpha-2"), Some("GB"));
    }

    #[test]
    fn missing_paths_are_not_found() {
        let doc = sample();
        assert_eq!(lookup(&doc, ""), None);
        assert_eq!(lookup(&doc, "results.1.components"), None);
        assert_eq!(lookup(&doc, "results.0.components.town"), None);
        assert_eq!(lookup(&doc, "results.zero"), None);
        assert_eq!(lookup(&doc, "results.0.confidence.deeper"), None);
    }

    #[test]
    fn digit_segment_never_matches_object_member() {
        let doc = json!({ "7": "seven", "list": ["a"] });
        assert_eq!(lookup(&doc, "7"), None);
        assert_eq!(get_str(&doc, "list.0"), Some("a"));
    }

    #[test]
    fn signed_or_mixed_segments_are_keys() {
        let doc = json!({ "-1": "minus", "1a": "mixed", "arr": [1, 2] });
        assert_eq!(get_str(&doc, "-1"), Some("minus"));
        assert_eq!(get_str(&doc, "1a"), Some("mixed"));
        assert_eq!(lookup(&doc, "arr.-1"), None);
    }

    #[test]
    fn oversized_index_falls_back_to_key() {
        let doc = sample();
        assert_eq!(get_str(&doc, "99999999999999999999999"), Some("big key"));
        assert_eq!(lookup(&doc, "results.99999999999999999999999"), None);
    }

    #[test]
    fn empty_segments_are_keys() {
        let doc = sample();
        assert_eq!(get_str(&doc, "."), Some("empty keys"));
        assert_eq!(lookup(&doc, "results..city"), None);
    }

    #[test]
    fn typed_accessors_reject_null_and_mismatch() {
        let doc = sample();
        assert_eq!(get_str(&doc, "results.0.components.postcode"), None);
        assert!(lookup(&doc, "results.0.components.postcode").is_some());
        assert_eq!(get_int(&doc, "results.0.components.city"), None);
        assert_eq!(get_str(&doc, "results.0.confidence"), None);
        assert_eq!(get_double(&doc, "results.0.components"), None);
    }

    #[test]
    fn numeric_accessors() {
        let doc = sample();
        assert_eq!(get_int(&doc, "results.0.confidence"), Some(9));
        assert_eq!(get_double(&doc, "results.0.confidence"), Some(9.0));
        assert_eq!(get_double(&doc, "results.0.geometry.lat"), Some(51.5007));
        assert_eq!(get_int(&doc, "results.0.geometry.lat"), Some(51));
        assert_eq!(
            get_int(&doc, "results.0.annotations.timestamp.created_unix"),
            Some(1_500_000_000)
        );
    }

    #[test]
    fn get_as_deserializes_subtrees() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Geometry {
            lat: f64,
            lng: f64,
        }

        let doc = sample();
        let geometry: Option<Geometry> = get_as(&doc, "results.0.geometry");
        assert_eq!(
            geometry,
            Some(Geometry {
                lat: 51.5007,
                lng: -0.1246
            })
        );
        let wrong: Option<Geometry> = get_as(&doc, "results.0.components");
        assert_eq!(wrong, None);
    }
}
