//! Client for the OpenCage forward and reverse geocoding API.
//!
//! [`Geocoder`] builds the request URL, performs the GET request and parses
//! the answer into a [`GeocodeResponse`]. Typed fields cover status, rate
//! limits, confidence, geometry and bounds; anything else in a result is
//! reachable through dotted paths such as `"components.city"` or
//! `"annotations.timezone.0"` (see [`path`]).

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod path;
pub mod request;
mod requests;
pub mod response;
pub mod types;

pub use client::Geocoder;
pub use config::GeocoderConfig;
pub use error::GeocodeError;
pub use params::QueryParams;
pub use request::RequestKind;
pub use response::{GeoResult, GeocodeResponse, RateInfo, Status};
pub use types::{Bounds, LatLng};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
