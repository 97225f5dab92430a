// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    DifficultyLevel, DisposalGuideline, FacetOption, Facets, GeoPoint, Location,
    MaterialAcceptance, MaterialKey, RankedLocation, RecognizedMaterial, RecyclingTip,
    WasteCategory,
};
pub use requests::{
    AnalyzeQuery, CategoryRequest, GuidelineRequest, ImageUpload, MaterialFlags, NearbyQuery,
    PageQuery, TipRequest,
};
pub use responses::{ErrorResponse, HealthResponse, ImageAnalysisResponse, Page};
