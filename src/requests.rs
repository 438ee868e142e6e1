// src/requests.rs

use crate::error::GeocodeError;
use crate::Geocoder;

use serde_json::Value;
use url::Url;

const BODY_SNIPPET_LEN: usize = 100;

impl Geocoder {
    // Sends one GET and reads the whole body. Only transport failures are
    // errors here; the HTTP status is logged and otherwise ignored.
    pub(crate) async fn _send_and_read_body(&self, url: &str) -> Result<String, GeocodeError> {
        let parsed_url = Url::parse(url)?;

        let response = self
            .http_client
            .get(parsed_url)
            .send()
            .await
            .map_err(|e| {
                log::warn!("Geocoding request to '{}' failed: {}", self.redact(url), e);
                GeocodeError::ReqwestError(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(GeocodeError::ReqwestError)?;

        if status.is_success() {
            log::debug!("Received HTTP {} ({} bytes)", status, body.len());
        } else {
            log::warn!(
                "Geocoding server answered HTTP {} for '{}'",
                status,
                self.redact(url)
            );
        }
        Ok(body)
    }

    pub(crate) fn _decode_body(&self, url: &str, body: &str) -> Result<Value, GeocodeError> {
        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "JSON decoding failed for response from '{}'. Error: {}. Body: {}",
                self.redact(url),
                e,
                body.chars().take(BODY_SNIPPET_LEN).collect::<String>()
            );
            GeocodeError::JsonError(e)
        })
    }
}
