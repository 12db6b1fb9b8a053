use crate::view::{ExperienceView, GalleryItem, InspirationItem, PropertyView, SearchHit, StoryView};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub understanding: String,
    pub properties: Vec<SearchHit>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperiencesResponse {
    pub success: bool,
    pub summary: String,
    pub experiences: Vec<ExperienceView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspirationResponse {
    pub success: bool,
    pub summary: String,
    pub stories: Vec<StoryView>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryResponse {
    pub success: bool,
    pub summary: String,
    pub gallery: Vec<GalleryItem>,
}

/// Results keyed by detected intent; undetected intents are omitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyView>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiences: Option<Vec<ExperienceView>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspiration: Option<Vec<InspirationItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub understanding: String,
    pub recommendations: Recommendations,
}

/// Body returned for internal failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
