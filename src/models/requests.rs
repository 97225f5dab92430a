use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{DifficultyLevel, MaterialAcceptance, MaterialKey};

/// Create or update a waste category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 3, max = 50), custom(function = "not_blank"))]
    #[serde(deserialize_with = "trimmed")]
    pub name: String,
    #[validate(length(min = 3, max = 510), custom(function = "not_blank"))]
    #[serde(deserialize_with = "trimmed")]
    pub description: String,
}

/// Create or update a disposal guideline
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuidelineRequest {
    #[validate(length(min = 3, max = 100), custom(function = "not_blank"))]
    #[serde(deserialize_with = "trimmed")]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(deserialize_with = "trimmed")]
    pub instructions: String,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Create or update a recycling tip
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TipRequest {
    #[validate(length(min = 3, max = 100), custom(function = "not_blank"))]
    #[serde(deserialize_with = "trimmed")]
    pub title: String,
    #[validate(length(min = 1))]
    pub steps: Vec<String>,
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    #[serde(default)]
    pub environmental_impact: Option<String>,
    #[validate(custom(function = "not_blank"))]
    #[serde(deserialize_with = "trimmed")]
    pub time_required: String,
    #[serde(default)]
    pub required_materials: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

/// Surrounding whitespace is dropped before length checks run
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Material flags as they arrive on the query string; absent means `false`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialFlags {
    #[serde(default)]
    pub plastic: bool,
    #[serde(default)]
    pub paper: bool,
    #[serde(default)]
    pub cardboard: bool,
    #[serde(default)]
    pub cans: bool,
    #[serde(default)]
    pub cartons: bool,
    #[serde(default)]
    pub ewaste: bool,
    #[serde(default)]
    pub metal: bool,
    #[serde(default)]
    pub motor_oil: bool,
}

impl From<MaterialFlags> for MaterialAcceptance {
    fn from(flags: MaterialFlags) -> Self {
        MaterialAcceptance::new()
            .with(MaterialKey::Plastic, flags.plastic)
            .with(MaterialKey::Paper, flags.paper)
            .with(MaterialKey::Cardboard, flags.cardboard)
            .with(MaterialKey::Cans, flags.cans)
            .with(MaterialKey::Cartons, flags.cartons)
            .with(MaterialKey::Ewaste, flags.ewaste)
            .with(MaterialKey::Metal, flags.metal)
            .with(MaterialKey::MotorOil, flags.motor_oil)
    }
}

/// Query for `GET /locations/nearby`
///
/// Coordinates are mandatory; `radius` falls back to the configured default.
/// Flags stay inline: serde_urlencoded cannot parse bools inside a flattened struct.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    pub radius: Option<f64>,
    #[serde(rename = "type")]
    pub location_type: Option<String>,
    #[serde(default)]
    pub plastic: bool,
    #[serde(default)]
    pub paper: bool,
    #[serde(default)]
    pub cardboard: bool,
    #[serde(default)]
    pub cans: bool,
    #[serde(default)]
    pub cartons: bool,
    #[serde(default)]
    pub ewaste: bool,
    #[serde(default)]
    pub metal: bool,
    #[serde(default)]
    pub motor_oil: bool,
}

impl NearbyQuery {
    pub fn material_flags(&self) -> MaterialFlags {
        MaterialFlags {
            plastic: self.plastic,
            paper: self.paper,
            cardboard: self.cardboard,
            cans: self.cans,
            cartons: self.cartons,
            ewaste: self.ewaste,
            metal: self.metal,
            motor_oil: self.motor_oil,
        }
    }
}

/// Pagination for `GET /locations`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: u32,
    #[serde(default = "default_sort")]
    pub sort: String,
}

fn default_page_size() -> u32 {
    20
}

fn default_sort() -> String {
    "name".to_string()
}

/// Optional search context sent alongside an image upload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AnalyzeQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0))]
    pub radius: Option<f64>,
}

/// `multipart/form-data` body for `POST /image-recognition/analyze`
///
/// The image travels in `file`; coordinates may come as form fields or on the
/// query string, form fields winning.
#[derive(MultipartForm)]
pub struct ImageUpload {
    #[multipart(limit = "10MiB")]
    pub file: Option<Bytes>,
    pub latitude: Option<Text<f64>>,
    pub longitude: Option<Text<f64>>,
    pub radius: Option<Text<f64>>,
}

impl ImageUpload {
    /// Image bytes, if a non-empty `file` part was sent
    pub fn image(&self) -> Option<&[u8]> {
        self.file
            .as_ref()
            .map(|f| f.data.as_ref())
            .filter(|data| !data.is_empty())
    }

    pub fn search_context(&self, query: &AnalyzeQuery) -> AnalyzeQuery {
        AnalyzeQuery {
            latitude: self.latitude.as_ref().map(|t| t.0).or(query.latitude),
            longitude: self.longitude.as_ref().map(|t| t.0).or(query.longitude),
            radius: self.radius.as_ref().map(|t| t.0).or(query.radius),
        }
    }
}
