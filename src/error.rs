use reqwest::header::InvalidHeaderValue;
// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("URL parsing failed: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("JSON processing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Malformed geocoding response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(InvalidHeaderValue),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Operation forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Request too long: {0}")]
    RequestTooLong(String),

    #[error("Upgrade required: {0}")]
    UpgradeRequired(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Other API error (code {code}): {message}")]
    OtherApiError { code: i64, message: String },
}

impl GeocodeError {
    /// Creates a `GeocodeError` from the `status.code` / `status.message` pair
    /// the API puts in every response body.
    pub(crate) fn from_status(code: i64, message: &str) -> Self {
        let detail = format!("({}) {}", code, message);
        match code {
            400 => GeocodeError::InvalidRequest(detail),
            401 => GeocodeError::AuthenticationError(detail),
            402 => GeocodeError::QuotaExceeded(detail),
            403 => GeocodeError::Forbidden(detail),
            404 => GeocodeError::NotFound(detail),
            405 => GeocodeError::MethodNotAllowed(detail),
            408 => GeocodeError::Timeout(detail),
            410 => GeocodeError::RequestTooLong(detail),
            426 => GeocodeError::UpgradeRequired(detail),
            429 => GeocodeError::RateLimited(detail),
            500..=599 => GeocodeError::InternalServerError(detail),
            _ => GeocodeError::OtherApiError {
                code,
                message: message.to_string(),
            },
        }
    }

    /// Whether the error came from a non-success status reported by the API,
    /// as opposed to a transport, decoding or usage problem.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            GeocodeError::InvalidRequest(_)
                | GeocodeError::AuthenticationError(_)
                | GeocodeError::QuotaExceeded(_)
                | GeocodeError::Forbidden(_)
                | GeocodeError::NotFound(_)
                | GeocodeError::MethodNotAllowed(_)
                | GeocodeError::Timeout(_)
                | GeocodeError::RequestTooLong(_)
                | GeocodeError::UpgradeRequired(_)
                | GeocodeError::RateLimited(_)
                | GeocodeError::InternalServerError(_)
                | GeocodeError::OtherApiError { .. }
        )
    }
}
