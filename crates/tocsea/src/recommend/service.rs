use std::sync::Arc;

use tocsea_core::recommend::prompt::{DETAILED_PREAMBLE, LIST_PREAMBLE};
use tocsea_core::recommend::{
    build_detailed_prompt, build_list_prompt, extract_with_strategy, sectionize, truncate_chars,
    DetailedSections, RecommendationResponse, Section, SoilAssessment,
};

use crate::ai::{CompletionRequest, ModelClient, ProviderError};
use crate::error::Error;

/// Characters of the vegetation list handed on to the detailed call.
pub const VEGETATION_HANDOFF_CHARS: usize = 500;

/// How a failed model call is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorMode {
    /// Embed the error text in a 200 payload (legacy wire contract)
    FailOpen,
    /// Fail the request with the provider error
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f64,
    pub max_tokens_list: u64,
    pub max_tokens_detailed: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens_list: 500,
            max_tokens_detailed: 800,
        }
    }
}

/// Runs the two sequential model calls for one request.
#[derive(Clone)]
pub struct RecommendationService {
    client: Arc<dyn ModelClient>,
    settings: GenerationSettings,
    error_mode: ErrorMode,
}

impl RecommendationService {
    pub fn new(
        client: Arc<dyn ModelClient>,
        settings: GenerationSettings,
        error_mode: ErrorMode,
    ) -> Self {
        Self {
            client,
            settings,
            error_mode,
        }
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    /// Ask for the flat vegetation list and extract its entries.
    pub async fn vegetation_list(
        &self,
        assessment: &SoilAssessment,
    ) -> Result<String, ProviderError> {
        let prompt = build_list_prompt(assessment);
        let raw = self
            .client
            .complete(CompletionRequest {
                preamble: LIST_PREAMBLE,
                prompt: &prompt,
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens_list,
            })
            .await?;

        let extraction = extract_with_strategy(&raw);
        match extraction.strategy {
            Some(strategy) => log::info!("Extracted vegetation list with {}", strategy.name()),
            None => log::warn!("No recommendation entries found, returning raw model text"),
        }

        Ok(extraction.text)
    }

    /// Ask for the three-section breakdown of `vegetation`.
    pub async fn detailed(
        &self,
        assessment: &SoilAssessment,
        vegetation: &str,
    ) -> Result<DetailedSections, ProviderError> {
        let prompt = build_detailed_prompt(assessment, vegetation);
        let raw = self
            .client
            .complete(CompletionRequest {
                preamble: DETAILED_PREAMBLE,
                prompt: &prompt,
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens_detailed,
            })
            .await?;

        let sections = sectionize(&raw);
        if sections.is_empty() {
            log::warn!("No sections found in detailed model output");
        } else {
            for section in Section::ALL {
                log::debug!(
                    "Section {}: {} bullets",
                    section.key(),
                    sections.bullets(section).len()
                );
            }
        }

        Ok(sections)
    }

    /// Produce the full response for one request.
    ///
    /// The detailed call embeds the list result, so the two calls run in
    /// sequence. In [`ErrorMode::FailOpen`] a provider failure never fails
    /// the request: the error text takes the place of the content instead.
    pub async fn recommend(
        &self,
        assessment: &SoilAssessment,
    ) -> Result<RecommendationResponse, Error> {
        log::info!(
            "Generating recommendations for {} ({:.2} t/yr)",
            assessment.soil_type,
            assessment.soil_loss
        );

        let recommendations = match self.vegetation_list(assessment).await {
            Ok(list) => list,
            Err(e) => self.degrade(e, |e| {
                format!("Error generating recommendations: {}", e.detail())
            })?,
        };

        let vegetation = truncate_chars(&recommendations, VEGETATION_HANDOFF_CHARS);
        let detailed = match self.detailed(assessment, vegetation).await {
            Ok(sections) => sections,
            Err(e) => self.degrade(e, |e| DetailedSections::provider_failure(e.detail()))?,
        };

        Ok(RecommendationResponse::new(recommendations, detailed))
    }

    fn degrade<T>(
        &self,
        error: ProviderError,
        fallback: impl FnOnce(&ProviderError) -> T,
    ) -> Result<T, Error> {
        log::error!("{error}");
        match self.error_mode {
            ErrorMode::FailOpen => Ok(fallback(&error)),
            ErrorMode::Strict => Err(Error::Provider(error)),
        }
    }
}
