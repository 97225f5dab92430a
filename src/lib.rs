//! EcoTrack - waste management and recycling facility service
//!
//! The core of this library is a geo-proximity search engine over recycling
//! locations: great-circle distance, radius, material and facility-type
//! filters, distance ranking and facet extraction. Around it sit a PostgreSQL
//! store for reference data and an HTTP API built on actix-web.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{all_facets, distance_km, LocationSearch, NearbySearch};
pub use error::ApiError;
pub use models::{FacetOption, Facets, GeoPoint, Location, MaterialAcceptance, MaterialKey, RankedLocation};
