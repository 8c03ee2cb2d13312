use serde::{Deserialize, Serialize};

use super::sections::DetailedSections;

/// A validated recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct SoilAssessment {
    /// Soil type label, e.g. "Loamy Soil".
    pub soil_type: String,
    /// Predicted soil loss in metric tons per year.
    pub soil_loss: f64,
}

/// Successful `POST /api/recommendations` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub success: bool,
    /// Newline-joined recommendation entries, or the raw model text when
    /// nothing could be extracted.
    pub recommendations: String,
    pub detailed_recommendations: DetailedSections,
}

impl RecommendationResponse {
    pub fn new(recommendations: String, detailed_recommendations: DetailedSections) -> Self {
        Self {
            success: true,
            recommendations,
            detailed_recommendations,
        }
    }
}

/// Body of every non-2xx API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `GET /api/health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
