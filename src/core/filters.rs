use crate::core::distance::distance_to;
use crate::models::{GeoPoint, Location, MaterialAcceptance, MaterialKey, RankedLocation};

/// Radius used when a caller does not supply one
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Keep locations within `radius_km` of `origin`, annotated with their distance
///
/// Inclusion is `distance <= radius_km`, so a radius of 0 keeps only
/// coincident points. Input order is preserved.
pub fn within_radius<I>(locations: I, origin: GeoPoint, radius_km: f64) -> Vec<RankedLocation>
where
    I: IntoIterator<Item = Location>,
{
    locations
        .into_iter()
        .filter_map(|location| {
            let distance = distance_to(origin, &location);
            (distance <= radius_km).then_some(RankedLocation { location, distance })
        })
        .collect()
}

/// Check if a location satisfies every requested material
///
/// Only flags set to `true` in `wanted` constrain; a `false` flag never
/// requires the location to reject that material.
#[inline]
pub fn accepts_all(location: &Location, wanted: &MaterialAcceptance) -> bool {
    wanted
        .accepted()
        .all(|material| location.accepted_materials.accepts(material))
}

/// Keep locations that accept every material flagged in `wanted`
///
/// With nothing flagged the input comes back unchanged.
pub fn by_materials<I>(locations: I, wanted: &MaterialAcceptance) -> Vec<Location>
where
    I: IntoIterator<Item = Location>,
{
    locations
        .into_iter()
        .filter(|location| accepts_all(location, wanted))
        .collect()
}

/// Keep locations whose stored type equals `location_type` exactly
pub fn by_type<I>(locations: I, location_type: &str) -> Vec<Location>
where
    I: IntoIterator<Item = Location>,
{
    locations
        .into_iter()
        .filter(|location| location.location_type.as_deref() == Some(location_type))
        .collect()
}

/// Acceptance flag a classification category corresponds to.
///
/// Closed table: paper, plastic, metal, electronic and cardboard are the only
/// category names with a direct counterpart. Matching ignores case.
pub fn compatible_material(category_name: &str) -> Option<MaterialKey> {
    match category_name.to_lowercase().as_str() {
        "paper" => Some(MaterialKey::Paper),
        "plastic" => Some(MaterialKey::Plastic),
        "metal" => Some(MaterialKey::Metal),
        "electronic" => Some(MaterialKey::Ewaste),
        "cardboard" => Some(MaterialKey::Cardboard),
        _ => None,
    }
}

/// Decide whether a location with `accepts` can take waste of a category
///
/// The lookup table in [`compatible_material`] is tried first. Failing that,
/// a category whose numeric id or lowercase name is itself a material key
/// matches when the location accepts that key. Being a known key is not
/// enough on its own: "paper" never matches a location that only takes ewaste.
pub fn category_compatible(
    category_name: &str,
    category_id: Option<i64>,
    accepts: &MaterialAcceptance,
) -> bool {
    if let Some(material) = compatible_material(category_name) {
        if accepts.accepts(material) {
            return true;
        }
    }

    let by_id = category_id.and_then(|id| MaterialKey::from_key(&id.to_string()));
    let by_name = MaterialKey::from_key(&category_name.to_lowercase());

    [by_id, by_name]
        .into_iter()
        .flatten()
        .any(|material| accepts.accepts(material))
}
