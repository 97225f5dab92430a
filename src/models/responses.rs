use serde::{Deserialize, Serialize};

use crate::models::domain::{DisposalGuideline, RankedLocation, RecognizedMaterial, RecyclingTip};

/// One page of a paginated listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size))
        };

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for the image analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisResponse {
    pub material: RecognizedMaterial,
    pub nearby_locations: Vec<RankedLocation>,
    pub disposal_guidelines: Vec<DisposalGuideline>,
    pub recycling_tips: Vec<RecyclingTip>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_counts() {
        let page = Page::new(vec![1, 2, 3], 0, 3, 7);
        assert_eq!(page.total_pages, 3);

        let empty: Page<u8> = Page::new(vec![], 0, 20, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
