use actix_web::{web, HttpResponse};
use validator::Validate;

use super::AppState;
use crate::core::{all_facets, by_materials, by_type, facets, NearbySearch};
use crate::error::ApiError;
use crate::models::{GeoPoint, MaterialAcceptance, MaterialFlags, NearbyQuery, Page, PageQuery};
use crate::services::{postgres::SORTABLE_COLUMNS, LocationSort};

/// Configure recycling location and filter option routes
///
/// Fixed paths are registered before `/{id}` so they are not captured by it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/locations")
            .route("", web::get().to(list_locations))
            .route("/nearby", web::get().to(find_nearby))
            .route("/by-materials", web::get().to(find_by_materials))
            .route("/map-data", web::get().to(map_data))
            .route("/by-type/{type}", web::get().to(find_by_type))
            .route("/filter-options", web::get().to(filter_options))
            .route("/filter-options/cities", web::get().to(city_options))
            .route("/filter-options/facility-types", web::get().to(facility_type_options))
            .route("/filter-options/materials", web::get().to(material_options))
            .route("/{id}", web::get().to(get_location)),
    );
}

/// GET /api/locations?page=0&size=20&sort=name
async fn list_locations(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let sort = LocationSort::parse(&query.sort).ok_or_else(|| {
        ApiError::Validation(format!(
            "Unsupported sort '{}'; expected one of {}",
            query.sort,
            SORTABLE_COLUMNS.join(", ")
        ))
    })?;

    let (content, total) = state
        .postgres
        .list_locations_page(query.page, query.size, sort)
        .await?;

    Ok(HttpResponse::Ok().json(Page::new(content, query.page, query.size, total)))
}

async fn get_location(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let location = state.postgres.get_location(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(location))
}

/// GET /api/locations/by-type/{type}, exact and case-sensitive
async fn find_by_type(
    state: web::Data<AppState>,
    location_type: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let locations = state.postgres.all_locations().await?;
    let matching = by_type(locations, &location_type);

    tracing::debug!("{} locations of type {}", matching.len(), location_type.as_str());
    Ok(HttpResponse::Ok().json(matching))
}

async fn map_data(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let locations = state.postgres.all_locations().await?;
    Ok(HttpResponse::Ok().json(locations))
}

/// Find recycling locations near a point
///
/// GET /api/locations/nearby?latitude=-26.2&longitude=28.04&radius=10&type=Drop-off&plastic=true
///
/// Results are ordered by distance and carry a `distance` field in km.
async fn find_nearby(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;

    let mut search = NearbySearch::new(GeoPoint::new(query.latitude, query.longitude))
        .materials(query.material_flags().into());
    if let Some(radius) = query.radius {
        search = search.radius(radius);
    }
    if let Some(location_type) = query.location_type.as_deref().filter(|t| !t.is_empty()) {
        search = search.location_type(location_type);
    }

    let candidates = state.postgres.all_locations().await?;
    let result = state.search.find_nearby(&search, candidates);

    tracing::info!(
        "Returning {} nearby locations for ({}, {}) from {} candidates",
        result.locations.len(),
        query.latitude,
        query.longitude,
        result.total_candidates
    );

    Ok(HttpResponse::Ok().json(result.locations))
}

/// GET /api/locations/by-materials?plastic=true&paper=true
///
/// Locations must accept every material flagged `true`.
async fn find_by_materials(
    state: web::Data<AppState>,
    flags: web::Query<MaterialFlags>,
) -> Result<HttpResponse, ApiError> {
    let wanted = MaterialAcceptance::from(flags.into_inner());
    let locations = state.postgres.all_locations().await?;

    Ok(HttpResponse::Ok().json(by_materials(locations, &wanted)))
}

async fn filter_options(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let locations = state.postgres.all_locations().await?;
    Ok(HttpResponse::Ok().json(all_facets(&locations)))
}

async fn city_options(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let locations = state.postgres.all_locations().await?;
    Ok(HttpResponse::Ok().json(facets::distinct_cities(&locations)))
}

async fn facility_type_options(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let locations = state.postgres.all_locations().await?;
    Ok(HttpResponse::Ok().json(facets::distinct_types(&locations)))
}

async fn material_options(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let locations = state.postgres.all_locations().await?;
    Ok(HttpResponse::Ok().json(facets::distinct_materials(&locations)))
}
