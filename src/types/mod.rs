// src/types/mod.rs

pub mod coordinate;

pub use coordinate::{Bounds, LatLng};
