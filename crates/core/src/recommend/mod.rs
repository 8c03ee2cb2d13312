pub mod extract;
pub mod prompt;
pub mod request;
pub mod sections;
pub mod types;

pub use extract::{extract_recommendations, extract_with_strategy, Extraction, ExtractionStrategy};
pub use prompt::{build_detailed_prompt, build_list_prompt, truncate_chars};
pub use request::{validate_request, ValidationError};
pub use sections::{sectionize, DetailedSections, Section};
pub use types::{ErrorResponse, HealthResponse, RecommendationResponse, SoilAssessment};
