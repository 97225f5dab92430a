use actix_web::{web, HttpResponse};
use validator::Validate;

use super::AppState;
use crate::error::ApiError;
use crate::models::CategoryRequest;

/// Configure waste category routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/{id}", web::get().to(get_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
}

async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let categories = state.postgres.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/categories/{id}, with its guidelines and tips
async fn get_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let category = state.postgres.get_category(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

async fn create_category(
    state: web::Data<AppState>,
    req: web::Json<CategoryRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let category = state.postgres.create_category(&req).await?;
    Ok(HttpResponse::Created().json(category))
}

async fn update_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    req: web::Json<CategoryRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let id = id.into_inner();
    tracing::debug!("Updating waste category {}", id);
    let category = state.postgres.update_category(id, &req).await?;
    Ok(HttpResponse::Ok().json(category))
}

async fn delete_category(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    state.postgres.delete_category(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
