// Route exports
pub mod categories;
pub mod guidelines;
pub mod health;
pub mod images;
pub mod locations;
pub mod tips;

use actix_web::web;
use std::sync::Arc;

use crate::core::LocationSearch;
use crate::services::{PostgresClient, VisionClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    /// Absent when no vision endpoint and key are configured
    pub vision: Option<Arc<VisionClient>>,
    pub search: LocationSearch,
    pub min_tag_confidence: f64,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(health::configure)
            .configure(categories::configure)
            .configure(guidelines::configure)
            .configure(tips::configure)
            .configure(locations::configure)
            .configure(images::configure),
    );
}
