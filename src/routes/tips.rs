use actix_web::{web, HttpResponse};
use validator::Validate;

use super::AppState;
use crate::error::ApiError;
use crate::models::TipRequest;

/// Configure recycling tip routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tips")
            .route("", web::get().to(list_tips))
            .route("", web::post().to(create_tip))
            .route("/{id}", web::get().to(get_tip))
            .route("/{id}", web::put().to(update_tip))
            .route("/{id}", web::delete().to(delete_tip))
            .route("/{id}/assign/{category_id}", web::patch().to(assign_tip))
            .route("/{id}/unassign", web::patch().to(unassign_tip)),
    );
}

async fn list_tips(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let tips = state.postgres.list_tips().await?;
    Ok(HttpResponse::Ok().json(tips))
}

async fn get_tip(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let tip = state.postgres.get_tip(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tip))
}

async fn create_tip(
    state: web::Data<AppState>,
    req: web::Json<TipRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let tip = state.postgres.create_tip(&req).await?;
    Ok(HttpResponse::Created().json(tip))
}

async fn update_tip(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    req: web::Json<TipRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let tip = state.postgres.update_tip(id.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(tip))
}

async fn delete_tip(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    state.postgres.delete_tip(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

async fn assign_tip(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, ApiError> {
    let (id, category_id) = path.into_inner();
    let tip = state.postgres.assign_tip(id, category_id).await?;

    tracing::info!("Assigned recycling tip {} to category {}", id, category_id);
    Ok(HttpResponse::Ok().json(tip))
}

async fn unassign_tip(state: web::Data<AppState>, id: web::Path<i64>) -> Result<HttpResponse, ApiError> {
    let tip = state.postgres.unassign_tip(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tip))
}
