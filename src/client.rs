// src/client.rs

use crate::config::GeocoderConfig;
use crate::error::GeocodeError;
use crate::params::QueryParams;
use crate::request::{build_request_url, RequestKind};
use crate::response::GeocodeResponse;
use crate::types::LatLng;

use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use reqwest::Client;

/// `User-Agent` sent when the configuration does not override it.
pub const USER_AGENT: &str = concat!("ocgeo-rs/", env!("CARGO_PKG_VERSION"), " (reqwest)");

/// Client for the forward and reverse geocoding endpoints.
///
/// A `Geocoder` owns an immutable [`GeocoderConfig`] and an HTTP connection
/// pool. It is cheap to clone and can be shared between tasks; each call sends
/// exactly one GET request and returns once the whole body has been parsed.
///
/// Requests do not look at the HTTP or API status: a well-formed answer
/// carrying e.g. `401` is returned as a normal [`GeocodeResponse`]. Use
/// [`GeocodeResponse::error_for_status`] to turn those into errors.
///
/// ```rust,no_run
/// use ocgeo_rs::{Geocoder, GeocodeError, QueryParams, LatLng};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), GeocodeError> {
/// let geocoder = Geocoder::new("my-api-key", "https://api.opencagedata.com/geocode/v1/json")?;
///
/// let mut params = QueryParams::new();
/// params.country_code("gb").limit(3).proximity(LatLng::new(51.5, -0.12));
///
/// let response = geocoder.forward("big ben", Some(&params)).await?;
/// response.error_for_status()?;
/// for result in &response {
///     println!(
///         "{} ({}) confidence={}",
///         result.formatted().unwrap_or("?"),
///         result.geometry,
///         result.confidence
///     );
/// }
///
/// let place = geocoder.reverse(51.5007, -0.1246, None).await?;
/// if let Some(city) = place.first().and_then(|r| r.get_str("components.city")) {
///     println!("City: {}", city);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Geocoder {
    pub(crate) config: GeocoderConfig,
    pub(crate) http_client: Client,
}

impl Geocoder {
    /// Creates a client for `server` authenticating with `api_key`, with the
    /// default transport settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty, `server` is not an absolute base
    /// URL, or the HTTP client cannot be built.
    pub fn new(api_key: &str, server: &str) -> Result<Self, GeocodeError> {
        Self::with_config(GeocoderConfig::new(api_key).with_server(server))
    }

    /// Creates a client from a full configuration.
    pub fn with_config(config: GeocoderConfig) -> Result<Self, GeocodeError> {
        config.validate()?;

        let user_agent = config.user_agent.as_deref().unwrap_or(USER_AGENT);
        let user_agent =
            HeaderValue::from_str(user_agent).map_err(GeocodeError::InvalidHeaderValue)?;

        let redirect = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };

        let mut builder = Client::builder().user_agent(user_agent).redirect(redirect);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http_client = builder.build().map_err(GeocodeError::ReqwestError)?;

        log::debug!("Geocoder initialized with config: {:?}", config);

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// The `User-Agent` value sent with every request.
    pub fn user_agent(&self) -> &str {
        self.config.user_agent.as_deref().unwrap_or(USER_AGENT)
    }

    /// The URL a request with these inputs would be sent to.
    pub fn request_url(&self, query: &str, kind: RequestKind, params: &QueryParams) -> String {
        build_request_url(
            &self.config.api_key,
            &self.config.server,
            query,
            kind,
            params,
        )
    }

    /// Resolves a free-text place description to candidate locations.
    ///
    /// `None` for `params` behaves like `QueryParams::default()`.
    pub async fn forward(
        &self,
        query: &str,
        params: Option<&QueryParams>,
    ) -> Result<GeocodeResponse, GeocodeError> {
        let mut response = GeocodeResponse::new();
        self.forward_into(query, params, &mut response).await?;
        Ok(response)
    }

    /// Resolves a coordinate pair to candidate places.
    ///
    /// Country code, road info and proximity in `params` are ignored.
    pub async fn reverse(
        &self,
        lat: f64,
        lng: f64,
        params: Option<&QueryParams>,
    ) -> Result<GeocodeResponse, GeocodeError> {
        let mut response = GeocodeResponse::new();
        self.reverse_into(lat, lng, params, &mut response).await?;
        Ok(response)
    }

    /// Like [`forward`](Self::forward) but repopulates an existing response.
    ///
    /// The response URL is replaced and every other field cleared before the
    /// request is sent, so on any failure `response` holds only the URL of
    /// the failed request.
    pub async fn forward_into(
        &self,
        query: &str,
        params: Option<&QueryParams>,
        response: &mut GeocodeResponse,
    ) -> Result<(), GeocodeError> {
        self._request(RequestKind::Forward, query, params, response)
            .await
    }

    /// Like [`reverse`](Self::reverse) but repopulates an existing response.
    pub async fn reverse_into(
        &self,
        lat: f64,
        lng: f64,
        params: Option<&QueryParams>,
        response: &mut GeocodeResponse,
    ) -> Result<(), GeocodeError> {
        let query = LatLng::new(lat, lng).to_string();
        self._request(RequestKind::Reverse, &query, params, response)
            .await
    }

    pub(crate) async fn _request(
        &self,
        kind: RequestKind,
        query: &str,
        params: Option<&QueryParams>,
        response: &mut GeocodeResponse,
    ) -> Result<(), GeocodeError> {
        let defaults = QueryParams::default();
        let params = params.unwrap_or(&defaults);

        let url = self.request_url(query, kind, params);
        response.set_url(url.clone());
        response.reset_keep_url();

        log::debug!(
            "Preparing geocoding request: Kind={:?}, URL={}",
            kind,
            self.redact(&url)
        );

        let body = self._send_and_read_body(&url).await?;
        let document = self._decode_body(&url, &body)?;
        response.populate(document)
    }

    // The API key travels in the query string; keep it out of logs.
    pub(crate) fn redact(&self, url: &str) -> String {
        url.replace(&self.config.api_key, "<redacted>")
    }
}
