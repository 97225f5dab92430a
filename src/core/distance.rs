use crate::models::{GeoPoint, Location};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `ref_lat` - Latitude of the reference point in degrees
/// * `ref_lon` - Longitude of the reference point in degrees
/// * `lat` - Latitude of the target point in degrees
/// * `lon` - Longitude of the target point in degrees
///
/// Inputs are not range-checked; out-of-range degrees flow through the formula.
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn distance_km(ref_lat: f64, ref_lon: f64, lat: f64, lon: f64) -> f64 {
    let delta_lat = (lat - ref_lat).to_radians();
    let delta_lon = (lon - ref_lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + ref_lat.to_radians().cos() * lat.to_radians().cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from `origin` to a location, in kilometers
#[inline]
pub fn distance_to(origin: GeoPoint, location: &Location) -> f64 {
    distance_km(
        origin.latitude,
        origin.longitude,
        location.latitude,
        location.longitude,
    )
}
