// src/response.rs

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeocodeError;
use crate::path;
use crate::types::{Bounds, LatLng};

static NULL: Value = Value::Null;

/// The `status` object present in every API response.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub code: i64,
    pub message: String,
}

impl Status {
    pub fn is_ok(&self) -> bool {
        self.code == 200
    }
}

/// Quota snapshot. Only returned for accounts subject to rate limiting.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateInfo {
    pub limit: i64,
    pub remaining: i64,
    /// Unix timestamp (seconds) at which `remaining` is reset to `limit`.
    pub reset: i64,
}

impl RateInfo {
    /// `reset` as a UTC timestamp, if it is in the representable range.
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.reset, 0)
    }
}

/// One geocoding candidate.
///
/// Besides the typed fields, every result keeps a shared handle on the parsed
/// response document, so any other field of its JSON object can be read later
/// through the `get_*` accessors (e.g. `"components.city"` or
/// `"annotations.timezone.name"`). The document lives as long as the longest
/// living result or response that refers to it.
#[derive(Clone)]
pub struct GeoResult {
    pub confidence: i64,
    /// The result's position, or [`LatLng::INVALID`] if the server sent none.
    pub geometry: LatLng,
    pub bounds: Option<Bounds>,
    document: Arc<Value>,
    index: usize,
}

impl fmt::Debug for GeoResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoResult")
            .field("confidence", &self.confidence)
            .field("geometry", &self.geometry)
            .field("bounds", &self.bounds)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl GeoResult {
    /// The raw JSON object of this result.
    pub fn node(&self) -> &Value {
        self.document
            .get("results")
            .and_then(|results| results.get(self.index))
            .unwrap_or(&NULL)
    }

    /// The whole response document this result was parsed from.
    pub fn document(&self) -> &Arc<Value> {
        &self.document
    }

    /// Position of this result in the server's ranking, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw JSON value at `path`, relative to this result.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path::lookup(self.node(), path)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        path::get_str(self.node(), path)
    }

    pub fn get_int(&self, path: &str) -> Option<i64> {
        path::get_int(self.node(), path)
    }

    pub fn get_double(&self, path: &str) -> Option<f64> {
        path::get_double(self.node(), path)
    }

    /// Deserializes the subtree at `path` into `T`.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, path: &str) -> Option<T> {
        path::get_as(self.node(), path)
    }

    /// The formatted, human readable place name.
    pub fn formatted(&self) -> Option<&str> {
        self.get_str("formatted")
    }

    /// Whether the server supplied a geometry for this result.
    pub fn has_geometry(&self) -> bool {
        self.geometry != LatLng::INVALID
    }
}

// Only the fields with typed counterparts; everything else stays in the document.
#[derive(Deserialize)]
struct RawResult {
    bounds: Option<Bounds>,
    geometry: Option<LatLng>,
}

/// A parsed geocoding response.
///
/// A `GeocodeResponse` can be reused across requests through
/// [`Geocoder::forward_into`](crate::Geocoder::forward_into) and
/// [`Geocoder::reverse_into`](crate::Geocoder::reverse_into): every request
/// replaces the URL and every parsed field.
#[derive(Debug, Clone, Default)]
pub struct GeocodeResponse {
    url: Option<String>,
    status: Status,
    rate: Option<RateInfo>,
    total_results: i64,
    results: Vec<GeoResult>,
}

fn malformed(detail: impl Into<String>) -> GeocodeError {
    let detail = detail.into();
    log::warn!("Malformed geocoding response: {}", detail);
    GeocodeError::MalformedResponse(detail)
}

impl GeocodeResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a response body.
    pub fn from_json(body: &str) -> Result<Self, GeocodeError> {
        let document: Value = serde_json::from_str(body)?;
        Self::from_value(document)
    }

    /// Builds a response from an already parsed document.
    pub fn from_value(document: Value) -> Result<Self, GeocodeError> {
        let mut response = Self::default();
        response.populate(document)?;
        Ok(response)
    }

    /// The request URL that produced this response, kept for diagnostics.
    /// It contains the API key.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn rate(&self) -> Option<&RateInfo> {
        self.rate.as_ref()
    }

    pub fn total_results(&self) -> i64 {
        self.total_results
    }

    /// Results in server order (best first).
    pub fn results(&self) -> &[GeoResult] {
        &self.results
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeoResult> {
        self.results.iter()
    }

    pub fn first(&self) -> Option<&GeoResult> {
        self.results.first()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Releases the URL, the results and this response's handle on the
    /// parsed document.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Turns a non-200 `status` into the matching error.
    ///
    /// Requests themselves never check the status; call this when a non-200
    /// answer should be treated as a failure.
    pub fn error_for_status(&self) -> Result<(), GeocodeError> {
        if self.status.is_ok() {
            Ok(())
        } else {
            Err(GeocodeError::from_status(
                self.status.code,
                &self.status.message,
            ))
        }
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = Some(url);
    }

    /// Clears every field except the URL.
    pub(crate) fn reset_keep_url(&mut self) {
        let url = self.url.take();
        *self = Self {
            url,
            ..Self::default()
        };
    }

    /// Replaces everything but the URL with the contents of `document`.
    ///
    /// On error the response is left reset, holding only its URL.
    pub(crate) fn populate(&mut self, document: Value) -> Result<(), GeocodeError> {
        self.reset_keep_url();

        let document = Arc::new(document);

        let status = document
            .get("status")
            .ok_or_else(|| malformed("missing `status`"))
            .and_then(|js| {
                Status::deserialize(js).map_err(|e| malformed(format!("invalid `status`: {}", e)))
            })?;

        let rate = match document.get("rate") {
            Some(js) if !js.is_null() => Some(
                RateInfo::deserialize(js)
                    .map_err(|e| malformed(format!("invalid `rate`: {}", e)))?,
            ),
            _ => None,
        };

        let total_js = document
            .get("total_results")
            .ok_or_else(|| malformed("missing `total_results`"))?;
        let total_results = if total_js.is_null() {
            0
        } else {
            path::get_int(&document, "total_results")
                .ok_or_else(|| malformed("`total_results` is not a number"))?
        };

        let mut results = Vec::new();
        if total_results > 0 {
            let items = document
                .get("results")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed("missing `results` array"))?;
            if items.len() as i64 != total_results {
                return Err(malformed(format!(
                    "`total_results` is {} but `results` holds {} entries",
                    total_results,
                    items.len()
                )));
            }

            results.reserve_exact(items.len());
            for (index, item) in items.iter().enumerate() {
                let raw = RawResult::deserialize(item)
                    .map_err(|e| malformed(format!("invalid result {}: {}", index, e)))?;
                results.push(GeoResult {
                    confidence: path::get_int(item, "confidence").unwrap_or(0),
                    geometry: raw.geometry.unwrap_or(LatLng::INVALID),
                    bounds: raw.bounds,
                    document: Arc::clone(&document),
                    index,
                });
            }
        }

        self.status = status;
        self.rate = rate;
        self.total_results = total_results;
        self.results = results;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a GeocodeResponse {
    type Item = &'a GeoResult;
    type IntoIter = std::slice::Iter<'a, GeoResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl IntoIterator for GeocodeResponse {
    type Item = GeoResult;
    type IntoIter = std::vec::IntoIter<GeoResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_results() -> Value {
        json!({
            "status": { "code": 200, "message": "OK" },
            "rate": { "limit": 2500, "remaining": 2497, "reset": 1700006400 },
            "total_results": 2,
            "results": [
                {
                    "confidence": 9,
                    "bounds": {
                        "northeast": { "lat": 51.5010, "lng": -0.1240 },
                        "southwest": { "lat": 51.5004, "lng": -0.1250 }
                    },
                    "geometry": { "lat": 51.5007, "lng": -0.1246 },
                    "components": { "city": "London", "country_code": "gb" },
                    "formatted": "Big Ben, London SW1A 0AA, United Kingdom"
                },
                {
                    "confidence": 3,
                    "components": { "country": "Elsewhere" }
                }
            ]
        })
    }

    #[test]
    fn zero_results() {
        let response =
            GeocodeResponse::from_json(r#"{"status":{"code":200,"message":"OK"},"total_results":0}"#)
                .unwrap();
        assert_eq!(response.total_results(), 0);
        assert!(response.is_empty());
        assert!(response.rate().is_none());
        assert_eq!(response.status().message, "OK");
    }

    #[test]
    fn null_total_results_means_zero() {
        let response = GeocodeResponse::from_value(json!({
            "status": { "code": 200, "message": "OK" },
            "total_results": null
        }))
        .unwrap();
        assert_eq!(response.total_results(), 0);
        assert!(response.is_empty());
    }

    #[test]
    fn parses_results_in_order() {
        let response = GeocodeResponse::from_value(two_results()).unwrap();
        assert_eq!(response.total_results(), 2);
        assert_eq!(response.len(), 2);

        let rate = response.rate().unwrap();
        assert_eq!((rate.limit, rate.remaining, rate.reset), (2500, 2497, 1700006400));
        assert_eq!(rate.reset_at().unwrap().timestamp(), 1700006400);

        let first = &response.results()[0];
        assert_eq!(first.confidence, 9);
        assert_eq!(first.geometry, LatLng::new(51.5007, -0.1246));
        let bounds = first.bounds.unwrap();
        assert_eq!(bounds.northeast, LatLng::new(51.5010, -0.1240));
        assert_eq!(bounds.southwest, LatLng::new(51.5004, -0.1250));
        assert_eq!(first.get_str("components.city"), Some("London"));
        assert_eq!(
            first.formatted(),
            Some("Big Ben, London SW1A 0AA, United Kingdom")
        );

        let second = &response.results()[1];
        assert_eq!(second.index(), 1);
        assert_eq!(second.confidence, 3);
        assert_eq!(second.geometry, LatLng::INVALID);
        assert!(!second.has_geometry());
        assert!(second.bounds.is_none());
        assert_eq!(second.get_str("components.country"), Some("Elsewhere"));
        assert_eq!(second.get_str("components.city"), None);
    }

    #[test]
    fn whole_float_total_results_is_accepted() {
        let response = GeocodeResponse::from_json(
            r#"{"status":{"code":200,"message":"OK"},"total_results":1.0,"results":[{}]}"#,
        )
        .unwrap();
        assert_eq!(response.total_results(), 1);
        assert_eq!(response.len(), 1);

        let err = GeocodeResponse::from_json(
            r#"{"status":{"code":200,"message":"OK"},"total_results":"1"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, GeocodeError::MalformedResponse(_)));
    }

    #[test]
    fn missing_or_null_confidence_defaults_to_zero() {
        let response = GeocodeResponse::from_value(json!({
            "status": { "code": 200, "message": "OK" },
            "total_results": 2,
            "results": [ { "confidence": null }, {} ]
        }))
        .unwrap();
        assert!(response.iter().all(|r| r.confidence == 0));
    }

    #[test]
    fn missing_status_is_malformed() {
        let err = GeocodeResponse::from_value(json!({ "total_results": 0 })).unwrap_err();
        assert!(matches!(err, GeocodeError::MalformedResponse(_)));
    }

    #[test]
    fn missing_total_results_is_malformed() {
        let err = GeocodeResponse::from_value(json!({
            "status": { "code": 200, "message": "OK" }
        }))
        .unwrap_err();
        assert!(matches!(err, GeocodeError::MalformedResponse(_)));
    }

    #[test]
    fn missing_results_array_is_malformed() {
        let err = GeocodeResponse::from_value(json!({
            "status": { "code": 200, "message": "OK" },
            "total_results": 1
        }))
        .unwrap_err();
        assert!(matches!(err, GeocodeError::MalformedResponse(_)));
    }

    #[test]
    fn count_mismatch_is_malformed() {
        let err = GeocodeResponse::from_value(json!({
            "status": { "code": 200, "message": "OK" },
            "total_results": 3,
            "results": [ {}, {} ]
        }))
        .unwrap_err();
        assert!(matches!(err, GeocodeError::MalformedResponse(_)));
    }

    #[test]
    fn partial_geometry_is_malformed() {
        let err = GeocodeResponse::from_value(json!({
            "status": { "code": 200, "message": "OK" },
            "total_results": 1,
            "results": [ { "geometry": { "lat": 10.0 } } ]
        }))
        .unwrap_err();
        assert!(matches!(err, GeocodeError::MalformedResponse(_)));
    }

    #[test]
    fn repopulating_keeps_url_and_replaces_the_rest() {
        let mut response = GeocodeResponse::from_value(two_results()).unwrap();
        response.set_url("https://example.test/json?q=x".to_string());

        response
            .populate(json!({
                "status": { "code": 200, "message": "OK" },
                "total_results": 0
            }))
            .unwrap();
        assert_eq!(response.url(), Some("https://example.test/json?q=x"));
        assert!(response.is_empty());
        assert!(response.rate().is_none());

        assert!(response.populate(json!({ "nope": true })).is_err());
        assert_eq!(response.url(), Some("https://example.test/json?q=x"));
        assert_eq!(response.status(), &Status::default());
        assert_eq!(response.total_results(), 0);
    }

    #[test]
    fn error_for_status_maps_code() {
        let ok = GeocodeResponse::from_value(two_results()).unwrap();
        assert!(ok.error_for_status().is_ok());

        let denied = GeocodeResponse::from_value(json!({
            "status": { "code": 403, "message": "IP address rejected" },
            "total_results": 0
        }))
        .unwrap();
        assert!(matches!(
            denied.error_for_status(),
            Err(GeocodeError::Forbidden(_))
        ));
    }

    #[test]
    fn dropping_the_response_releases_the_document() {
        let mut response = GeocodeResponse::from_value(two_results()).unwrap();
        let document = Arc::downgrade(response.results()[0].document());
        assert_eq!(document.strong_count(), 2);

        let kept = response.results()[1].clone();
        response.clear();
        assert!(response.is_empty());
        assert_eq!(document.strong_count(), 1);
        assert_eq!(kept.get_int("confidence"), Some(3));

        drop(kept);
        assert!(document.upgrade().is_none());
    }
}
