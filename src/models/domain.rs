use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Recyclable materials a facility can accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaterialKey {
    #[serde(rename = "plastic")]
    Plastic,
    #[serde(rename = "paper")]
    Paper,
    #[serde(rename = "cardboard")]
    Cardboard,
    #[serde(rename = "cans")]
    Cans,
    #[serde(rename = "cartons")]
    Cartons,
    #[serde(rename = "ewaste")]
    Ewaste,
    #[serde(rename = "metal")]
    Metal,
    #[serde(rename = "motorOil")]
    MotorOil,
}

impl MaterialKey {
    pub const ALL: [MaterialKey; 8] = [
        MaterialKey::Plastic,
        MaterialKey::Paper,
        MaterialKey::Cardboard,
        MaterialKey::Cans,
        MaterialKey::Cartons,
        MaterialKey::Ewaste,
        MaterialKey::Metal,
        MaterialKey::MotorOil,
    ];

    /// Wire key, e.g. `motorOil`
    pub fn key(self) -> &'static str {
        match self {
            MaterialKey::Plastic => "plastic",
            MaterialKey::Paper => "paper",
            MaterialKey::Cardboard => "cardboard",
            MaterialKey::Cans => "cans",
            MaterialKey::Cartons => "cartons",
            MaterialKey::Ewaste => "ewaste",
            MaterialKey::Metal => "metal",
            MaterialKey::MotorOil => "motorOil",
        }
    }

    /// Exact lookup of a wire key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which materials a location accepts.
///
/// Every key of [`MaterialKey`] has a definite value; anything never set is
/// `false`. Serialized as a `{"plastic": true, ...}` object carrying all keys.
/// Unrecognised keys are dropped when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct MaterialAcceptance {
    flags: [bool; 8],
}

impl MaterialAcceptance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an acceptance set with the given materials set to `true`
    pub fn of(materials: &[MaterialKey]) -> Self {
        let mut acceptance = Self::default();
        for material in materials {
            acceptance.set(*material, true);
        }
        acceptance
    }

    #[inline]
    pub fn accepts(&self, material: MaterialKey) -> bool {
        self.flags[material.index()]
    }

    pub fn set(&mut self, material: MaterialKey, accepted: bool) {
        self.flags[material.index()] = accepted;
    }

    pub fn with(mut self, material: MaterialKey, accepted: bool) -> Self {
        self.set(material, accepted);
        self
    }

    /// Materials flagged `true`, in [`MaterialKey::ALL`] order
    pub fn accepted(&self) -> impl Iterator<Item = MaterialKey> + '_ {
        MaterialKey::ALL.into_iter().filter(|m| self.accepts(*m))
    }

    pub fn is_empty(&self) -> bool {
        self.accepted().next().is_none()
    }
}

impl From<BTreeMap<String, bool>> for MaterialAcceptance {
    fn from(map: BTreeMap<String, bool>) -> Self {
        let mut acceptance = Self::default();
        for (key, accepted) in map {
            if let Some(material) = MaterialKey::from_key(&key) {
                acceptance.set(material, accepted);
            }
        }
        acceptance
    }
}

impl From<MaterialAcceptance> for BTreeMap<String, bool> {
    fn from(acceptance: MaterialAcceptance) -> Self {
        MaterialKey::ALL
            .into_iter()
            .map(|m| (m.key().to_string(), acceptance.accepts(m)))
            .collect()
    }
}

/// A recycling facility, as read from the location store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(rename = "type", default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub other: Option<String>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub is_dropoff_site: bool,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub accepted_materials: MaterialAcceptance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Reference point for proximity searches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A location annotated with its distance from one query's reference point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLocation {
    #[serde(flatten)]
    pub location: Location,
    /// Kilometres from the reference point
    pub distance: f64,
}

/// One selectable value of a filter facet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

/// All filter facets over a location collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub cities: Vec<FacetOption>,
    pub facility_types: Vec<FacetOption>,
    pub materials: Vec<FacetOption>,
}

/// Waste category with its attached guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteCategory {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub disposal_guidelines: Vec<DisposalGuideline>,
    #[serde(default)]
    pub recycling_tips: Vec<RecyclingTip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisposalGuideline {
    pub id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "difficulty_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecyclingTip {
    pub id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub steps: Vec<String>,
    pub difficulty: DifficultyLevel,
    pub environmental_impact: Option<String>,
    pub time_required: String,
    pub required_materials: Option<String>,
}

/// What the classifier made of an uploaded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedMaterial {
    pub material_type: String,
    pub detected_objects: Vec<String>,
    pub confidence_score: f64,
    pub recycling_instructions: String,
    pub is_recyclable: bool,
    pub waste_category_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_materials_are_false() {
        let acceptance = MaterialAcceptance::new();
        for material in MaterialKey::ALL {
            assert!(!acceptance.accepts(material));
        }
        assert!(acceptance.is_empty());
    }

    #[test]
    fn test_acceptance_serializes_all_keys() {
        let acceptance = MaterialAcceptance::of(&[MaterialKey::Plastic, MaterialKey::MotorOil]);
        let json = serde_json::to_value(acceptance).unwrap();

        assert_eq!(json["plastic"], true);
        assert_eq!(json["motorOil"], true);
        assert_eq!(json["paper"], false);
        assert_eq!(json.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_acceptance_ignores_unknown_keys() {
        let acceptance: MaterialAcceptance =
            serde_json::from_str(r#"{"plastic": true, "glass": true, "paper": false}"#).unwrap();

        assert_eq!(acceptance, MaterialAcceptance::of(&[MaterialKey::Plastic]));
    }

    #[test]
    fn test_material_key_lookup_is_exact() {
        assert_eq!(MaterialKey::from_key("motorOil"), Some(MaterialKey::MotorOil));
        assert_eq!(MaterialKey::from_key("motoroil"), None);
        assert_eq!(MaterialKey::from_key("glass"), None);
    }

    #[test]
    fn test_ranked_location_flattens() {
        let ranked = RankedLocation {
            location: Location {
                id: 7,
                latitude: -26.2041,
                longitude: 28.0473,
                name: "Depot".to_string(),
                municipality: None,
                city: Some("Johannesburg".to_string()),
                location_type: Some("Drop-off".to_string()),
                operation: None,
                website: None,
                other: None,
                group_name: None,
                is_dropoff_site: true,
                is_paid: false,
                accepted_materials: MaterialAcceptance::default(),
                created_at: None,
                updated_at: None,
            },
            distance: 1.5,
        };

        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["type"], "Drop-off");
        assert_eq!(json["distance"], 1.5);
    }
}
