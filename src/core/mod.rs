// Core engine exports
pub mod classification;
pub mod distance;
pub mod facets;
pub mod filters;
pub mod ranking;

pub use classification::{classify, Classification, ImageLabels, ImageTag, MaterialType};
pub use distance::{distance_km, distance_to};
pub use facets::{all_facets, distinct_values, FacetAttribute};
pub use filters::{by_materials, by_type, category_compatible, within_radius, DEFAULT_RADIUS_KM};
pub use ranking::{rank, LocationSearch, NearbySearch, SearchResult};
