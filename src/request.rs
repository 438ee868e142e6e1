// src/request.rs

use crate::params::QueryParams;

/// Which API call a request URL is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Free-text query to coordinates. Honors every parameter.
    Forward,
    /// `"lat,lng"` query to a place. Country code, road info and proximity are
    /// never sent.
    Reverse,
}

impl RequestKind {
    pub fn is_forward(self) -> bool {
        matches!(self, RequestKind::Forward)
    }
}

/// Builds the full request URL for a geocoding call.
///
/// Parameters are appended in a fixed order so the same inputs always give
/// the same URL. The query text, country code and language are
/// percent-encoded, so the URL sent is exactly the one returned. The API key is
/// appended as given.
///
/// ```
/// use ocgeo_rs::request::{build_request_url, RequestKind};
/// use ocgeo_rs::QueryParams;
///
/// let url = build_request_url(
///     "KEY",
///     "https://api.opencagedata.com/geocode/v1/json",
///     "big ben",
///     RequestKind::Forward,
///     &QueryParams::default(),
/// );
/// assert_eq!(
///     url,
///     "https://api.opencagedata.com/geocode/v1/json?q=big%20ben&key=KEY&no_annotations=0"
/// );
/// ```
pub fn build_request_url(
    api_key: &str,
    server: &str,
    query: &str,
    kind: RequestKind,
    params: &QueryParams,
) -> String {
    let forward = kind.is_forward();
    let mut url = format!(
        "{}?q={}&key={}",
        server,
        urlencoding::encode(query),
        api_key
    );

    if forward {
        if let Some(code) = non_empty(params.country_code.as_deref()) {
            url.push_str(&format!("&countrycode={}", urlencoding::encode(code)));
        }
    }
    if let Some(language) = non_empty(params.language.as_deref()) {
        url.push_str(&format!("&language={}", urlencoding::encode(language)));
    }
    if params.limit != 0 {
        url.push_str(&format!("&limit={}", params.limit));
    }
    if params.min_confidence != 0 {
        url.push_str(&format!("&min_confidence={}", params.min_confidence));
    }
    url.push_str(&format!(
        "&no_annotations={}",
        u8::from(params.no_annotations)
    ));
    if params.no_dedupe {
        url.push_str("&no_dedupe=1");
    }
    if params.no_record {
        url.push_str("&no_record=1");
    }
    if forward && params.road_info {
        url.push_str("&roadinfo=1");
    }
    if forward && params.proximity.is_valid() {
        url.push_str(&format!("&proximity={}", params.proximity));
    }
    url
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
