use serde::{Deserialize, Serialize};

/// Material family inferred from image labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Plastic,
    Paper,
    Glass,
    Metal,
    Electronic,
    Organic,
    Unknown,
}

impl MaterialType {
    pub fn as_str(self) -> &'static str {
        match self {
            MaterialType::Plastic => "plastic",
            MaterialType::Paper => "paper",
            MaterialType::Glass => "glass",
            MaterialType::Metal => "metal",
            MaterialType::Electronic => "electronic",
            MaterialType::Organic => "organic",
            MaterialType::Unknown => "unknown",
        }
    }

    pub fn is_recyclable(self) -> bool {
        self != MaterialType::Unknown
    }

    /// Name of the stored waste category this material is filed under
    pub fn waste_category_name(self) -> &'static str {
        match self {
            MaterialType::Plastic | MaterialType::Glass | MaterialType::Metal => "recyclable",
            MaterialType::Paper => "paper",
            MaterialType::Organic => "organic",
            MaterialType::Electronic => "e-waste",
            MaterialType::Unknown => "general waste",
        }
    }
}

/// Material for a single label, if the label is known
pub fn material_for_object(object: &str) -> Option<MaterialType> {
    let material = match object.to_lowercase().as_str() {
        "plastic bottle" | "water bottle" | "soda bottle" | "plastic container" => {
            MaterialType::Plastic
        }
        "newspaper" | "cardboard" | "cardboard box" | "magazine" => MaterialType::Paper,
        "glass bottle" | "wine bottle" | "beer bottle" | "glass jar" => MaterialType::Glass,
        "can" | "aluminum can" | "tin can" | "soda can" => MaterialType::Metal,
        "phone" | "computer" | "laptop" | "television" => MaterialType::Electronic,
        "food" | "fruit" | "vegetable" => MaterialType::Organic,
        _ => return None,
    };
    Some(material)
}

/// First recognisable label decides the material
pub fn map_objects_to_material<S: AsRef<str>>(detected_objects: &[S]) -> MaterialType {
    detected_objects
        .iter()
        .find_map(|object| material_for_object(object.as_ref()))
        .unwrap_or(MaterialType::Unknown)
}

/// A label with its confidence, as returned by the vision collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTag {
    pub name: String,
    pub confidence: f64,
}

/// Labels the vision collaborator produced for one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageLabels {
    /// Whole-image tags
    pub tags: Vec<ImageTag>,
    /// Tags of each detected object, best first
    pub objects: Vec<Vec<ImageTag>>,
}

impl ImageLabels {
    /// Tag names above `min_confidence`, then the top tag of every object
    pub fn detected_objects(&self, min_confidence: f64) -> Vec<String> {
        let tags = self
            .tags
            .iter()
            .filter(|tag| tag.confidence > min_confidence)
            .map(|tag| tag.name.clone());
        let objects = self
            .objects
            .iter()
            .filter_map(|object_tags| object_tags.first())
            .map(|tag| tag.name.clone());

        tags.chain(objects).collect()
    }

    /// Highest whole-image tag confidence, 0 when there are none
    pub fn highest_confidence(&self) -> f64 {
        self.tags
            .iter()
            .map(|tag| tag.confidence)
            .fold(0.0, f64::max)
    }
}

/// Outcome of classifying one image
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub material: MaterialType,
    pub detected_objects: Vec<String>,
    pub confidence: f64,
}

impl Classification {
    pub fn is_recyclable(&self) -> bool {
        self.material.is_recyclable()
    }
}

/// Turn raw labels into a material classification
pub fn classify(labels: &ImageLabels, min_confidence: f64) -> Classification {
    let detected_objects = labels.detected_objects(min_confidence);
    let material = map_objects_to_material(&detected_objects);

    Classification {
        material,
        detected_objects,
        confidence: labels.highest_confidence(),
    }
}
