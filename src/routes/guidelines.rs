use actix_web::{web, HttpResponse};
use validator::Validate;

use super::AppState;
use crate::error::ApiError;
use crate::models::GuidelineRequest;

/// Configure disposal guideline routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/guidelines")
            .route("", web::get().to(list_guidelines))
            .route("", web::post().to(create_guideline))
            .route("/{id}", web::get().to(get_guideline))
            .route("/{id}", web::put().to(update_guideline))
            .route("/{id}", web::delete().to(delete_guideline))
            .route("/{id}/assign/{category_id}", web::patch().to(assign_guideline))
            .route("/{id}/unassign", web::patch().to(unassign_guideline)),
    );
}

async fn list_guidelines(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let guidelines = state.postgres.list_guidelines().await?;
    Ok(HttpResponse::Ok().json(guidelines))
}

async fn get_guideline(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let guideline = state.postgres.get_guideline(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(guideline))
}

/// POST /api/guidelines
///
/// Request body:
/// ```json
/// {
///   "title": "Rinse plastic bottles",
///   "instructions": "Empty and rinse before recycling",
///   "categoryId": 1
/// }
/// ```
async fn create_guideline(
    state: web::Data<AppState>,
    req: web::Json<GuidelineRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let guideline = state.postgres.create_guideline(&req).await?;
    Ok(HttpResponse::Created().json(guideline))
}

async fn update_guideline(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    req: web::Json<GuidelineRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let guideline = state.postgres.update_guideline(id.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(guideline))
}

async fn delete_guideline(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    state.postgres.delete_guideline(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn assign_guideline(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, ApiError> {
    let (id, category_id) = path.into_inner();
    let guideline = state.postgres.assign_guideline(id, category_id).await?;

    tracing::info!("Assigned guideline {} to category {}", id, category_id);
    Ok(HttpResponse::Ok().json(guideline))
}

async fn unassign_guideline(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let guideline = state.postgres.unassign_guideline(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(guideline))
}
