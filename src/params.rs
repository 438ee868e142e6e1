// src/params.rs

use crate::types::LatLng;

/// Optional parameters accepted by forward and reverse geocoding requests.
///
/// `QueryParams::default()` sends nothing but `no_annotations=0`. Country code,
/// road info and proximity only apply to forward requests and are ignored for
/// reverse ones.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub(crate) country_code: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) limit: u32,          // 0 leaves the server default
    pub(crate) min_confidence: u32, // 0 leaves the server default
    pub(crate) no_annotations: bool,
    pub(crate) no_dedupe: bool,
    pub(crate) no_record: bool,
    pub(crate) road_info: bool,
    pub(crate) proximity: LatLng,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            country_code: None,
            language: None,
            limit: 0,
            min_confidence: 0,
            no_annotations: false,
            no_dedupe: false,
            no_record: false,
            road_info: false,
            proximity: LatLng::INVALID,
        }
    }
}

impl QueryParams {
    /// Creates an empty parameter set, identical to `QueryParams::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts forward results to one or more ISO 3166-1 alpha-2 codes,
    /// comma separated (e.g. `"gb"` or `"fr,be"`).
    pub fn country_code(&mut self, code: &str) -> &mut Self {
        self.country_code = Some(code.to_string());
        self
    }

    /// IETF language tag for the results (e.g. `"de"` or `"pt-BR"`).
    pub fn language(&mut self, language: &str) -> &mut Self {
        self.language = Some(language.to_string());
        self
    }

    /// Maximum number of results. `0` leaves it to the server.
    pub fn limit(&mut self, limit: u32) -> &mut Self {
        self.limit = limit;
        self
    }

    /// Only return results with at least this confidence (1-10). `0` disables
    /// the filter.
    pub fn min_confidence(&mut self, min_confidence: u32) -> &mut Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn no_annotations(&mut self, flag: bool) -> &mut Self {
        self.no_annotations = flag;
        self
    }

    pub fn no_dedupe(&mut self, flag: bool) -> &mut Self {
        self.no_dedupe = flag;
        self
    }

    /// Asks the server not to log the query contents.
    pub fn no_record(&mut self, flag: bool) -> &mut Self {
        self.no_record = flag;
        self
    }

    /// Requests road information in forward results.
    pub fn road_info(&mut self, flag: bool) -> &mut Self {
        self.road_info = flag;
        self
    }

    /// Biases forward results toward `point`. An invalid coordinate (such as
    /// [`LatLng::INVALID`]) clears the bias.
    pub fn proximity(&mut self, point: LatLng) -> &mut Self {
        self.proximity = point;
        self
    }

    // Accessors

    pub fn get_country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn get_language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn get_limit(&self) -> u32 {
        self.limit
    }

    pub fn get_min_confidence(&self) -> u32 {
        self.min_confidence
    }

    pub fn get_proximity(&self) -> LatLng {
        self.proximity
    }
}
