use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::{web, HttpResponse};
use validator::Validate;

use super::AppState;
use crate::core::{category_compatible, classify, NearbySearch};
use crate::error::{handle_multipart_error, ApiError};
use crate::models::{
    AnalyzeQuery, GeoPoint, ImageAnalysisResponse, ImageUpload, MaterialAcceptance,
    RecognizedMaterial, WasteCategory,
};
use crate::services::VisionError;

/// Largest accepted image upload
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const NO_INSTRUCTIONS: &str = "No specific instructions available.";

/// Configure image recognition routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/image-recognition")
            .app_data(
                MultipartFormConfig::default()
                    .memory_limit(MAX_IMAGE_BYTES)
                    .total_limit(MAX_IMAGE_BYTES + 64 * 1024)
                    .error_handler(handle_multipart_error),
            )
            .route("/analyze", web::post().to(analyze_image)),
    );
}

/// Classify an uploaded image and suggest where to take it
///
/// POST /api/image-recognition/analyze (multipart: file, latitude, longitude, radius)
///
/// Nearby locations are only searched when both coordinates are present.
async fn analyze_image(
    state: web::Data<AppState>,
    query: web::Query<AnalyzeQuery>,
    MultipartForm(upload): MultipartForm<ImageUpload>,
) -> Result<HttpResponse, ApiError> {
    let query = upload.search_context(&query);
    query.validate()?;

    let image = upload
        .image()
        .ok_or_else(|| ApiError::BadRequest("Image file is empty".to_string()))?;
    let vision = state.vision.as_ref().ok_or(VisionError::NotConfigured)?;

    tracing::debug!("Analyzing uploaded image ({} bytes)", image.len());
    let labels = vision.analyze(image.to_vec()).await?;
    let classification = classify(&labels, state.min_tag_confidence);

    let category = state
        .postgres
        .find_category_by_name(classification.material.waste_category_name())
        .await?;

    let recycling_instructions = category
        .disposal_guidelines
        .first()
        .map(|g| g.instructions.clone())
        .unwrap_or_else(|| NO_INSTRUCTIONS.to_string());

    let material_name = classification.material.as_str();
    let nearby_locations = match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => {
            let mut search = NearbySearch::new(GeoPoint::new(latitude, longitude));
            if let Some(radius) = query.radius {
                search = search.radius(radius);
            }

            let candidates = state.postgres.all_locations().await?;
            state
                .search
                .find_nearby(&search, candidates)
                .locations
                .into_iter()
                .filter(|r| takes_material(material_name, &category, &r.location.accepted_materials))
                .collect()
        }
        _ => Vec::new(),
    };

    tracing::info!(
        "Image classified as {} (category {}, confidence {:.2}), {} nearby locations",
        material_name,
        category.name,
        classification.confidence,
        nearby_locations.len()
    );

    let material = RecognizedMaterial {
        material_type: material_name.to_string(),
        is_recyclable: classification.is_recyclable(),
        detected_objects: classification.detected_objects,
        confidence_score: classification.confidence,
        recycling_instructions,
        waste_category_id: category.id,
    };

    Ok(HttpResponse::Ok().json(ImageAnalysisResponse {
        material,
        nearby_locations,
        disposal_guidelines: category.disposal_guidelines,
        recycling_tips: category.recycling_tips,
    }))
}

/// A location fits when it takes the recognised material or its waste category
fn takes_material(material: &str, category: &WasteCategory, accepts: &MaterialAcceptance) -> bool {
    category_compatible(material, None, accepts)
        || category_compatible(&category.name, Some(category.id), accepts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterialKey;

    fn category(id: i64, name: &str) -> WasteCategory {
        WasteCategory {
            id,
            name: name.to_string(),
            description: "test".to_string(),
            disposal_guidelines: vec![],
            recycling_tips: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_electronic_material_matches_ewaste_locations() {
        let ewaste = MaterialAcceptance::of(&[MaterialKey::Ewaste]);
        assert!(takes_material("electronic", &category(4, "e-waste"), &ewaste));
        assert!(!takes_material("electronic", &category(4, "e-waste"), &MaterialAcceptance::new()));
    }

    #[test]
    fn test_paper_category_matches_paper_locations() {
        let paper = MaterialAcceptance::of(&[MaterialKey::Paper]);
        assert!(takes_material("paper", &category(2, "paper"), &paper));
        assert!(!takes_material("glass", &category(1, "recyclable"), &paper));
    }
}
