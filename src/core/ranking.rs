use std::cmp::Ordering;

use crate::core::filters::{by_materials, by_type, within_radius, DEFAULT_RADIUS_KM};
use crate::models::{GeoPoint, Location, MaterialAcceptance, RankedLocation};

/// Order locations by distance, closest first
///
/// The sort is stable, so equal distances keep their incoming order.
pub fn rank(mut locations: Vec<RankedLocation>) -> Vec<RankedLocation> {
    locations.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
    });
    locations
}

/// Parameters of one proximity search
#[derive(Debug, Clone)]
pub struct NearbySearch {
    pub origin: GeoPoint,
    pub radius_km: Option<f64>,
    pub materials: MaterialAcceptance,
    pub location_type: Option<String>,
}

impl NearbySearch {
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            radius_km: None,
            materials: MaterialAcceptance::new(),
            location_type: None,
        }
    }

    pub fn radius(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    pub fn materials(mut self, materials: MaterialAcceptance) -> Self {
        self.materials = materials;
        self
    }

    pub fn location_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_type = Some(location_type.into());
        self
    }
}

/// Result of a proximity search
#[derive(Debug)]
pub struct SearchResult {
    pub locations: Vec<RankedLocation>,
    pub total_candidates: usize,
}

/// Proximity search pipeline
///
/// # Pipeline Stages
/// 1. Facility type (exact match, when requested)
/// 2. Material acceptance
/// 3. Radius, annotating each survivor with its distance
/// 4. Ranking by distance
#[derive(Debug, Clone, Copy)]
pub struct LocationSearch {
    default_radius_km: f64,
}

impl LocationSearch {
    pub fn new(default_radius_km: f64) -> Self {
        Self { default_radius_km }
    }

    pub fn default_radius_km(&self) -> f64 {
        self.default_radius_km
    }

    /// Run the full pipeline over an already-loaded collection
    pub fn find_nearby(&self, search: &NearbySearch, candidates: Vec<Location>) -> SearchResult {
        let total_candidates = candidates.len();
        let radius_km = search.radius_km.unwrap_or(self.default_radius_km);

        let typed = match search.location_type.as_deref() {
            Some(location_type) => by_type(candidates, location_type),
            None => candidates,
        };
        let accepted = by_materials(typed, &search.materials);
        let nearby = within_radius(accepted, search.origin, radius_km);

        SearchResult {
            locations: rank(nearby),
            total_candidates,
        }
    }
}

impl Default for LocationSearch {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS_KM)
    }
}
