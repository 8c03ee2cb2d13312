use std::sync::Arc;

use crate::ai::{ModelClient, Provider, RigModelClient};
use crate::prelude::*;
use crate::recommend::{ErrorMode, GenerationSettings, RecommendationService};

pub const DEFAULT_MODEL: &str = "meta-llama/Meta-Llama-3-8B-Instruct-Lite";

/// Model and service settings shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub struct ServiceOptions {
    /// Language model backend
    #[clap(long, env = "TOCSEA_PROVIDER", value_enum, default_value = "together")]
    pub provider: Provider,

    /// Together AI API key
    #[clap(long, env = "TOGETHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Provider base URL (defaults to the provider's public endpoint)
    #[clap(long, env = "TOCSEA_BASE_URL")]
    pub base_url: Option<String>,

    /// Model name
    #[clap(long, env = "TOCSEA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature for both model calls
    #[clap(long, env = "TOCSEA_TEMPERATURE", default_value = "0.3")]
    pub temperature: f64,

    /// Token limit for the vegetation list call
    #[clap(long, env = "TOCSEA_MAX_TOKENS_LIST", default_value = "500")]
    pub max_tokens_list: u64,

    /// Token limit for the detailed sections call
    #[clap(long, env = "TOCSEA_MAX_TOKENS_DETAILED", default_value = "800")]
    pub max_tokens_detailed: u64,

    /// How model failures are reported to callers
    #[clap(long, env = "TOCSEA_ERROR_MODE", value_enum, default_value = "fail-open")]
    pub error_mode: ErrorMode,
}

impl ServiceOptions {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: self.temperature,
            max_tokens_list: self.max_tokens_list,
            max_tokens_detailed: self.max_tokens_detailed,
        }
    }

    pub fn build_client(&self) -> Result<RigModelClient> {
        let client = match self.provider {
            Provider::Together => {
                let api_key = self
                    .api_key
                    .as_deref()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_eyre("TOGETHER_API_KEY (or --api-key) is required for the together provider")?;
                RigModelClient::together(api_key, self.base_url(), &self.model)?
            }
            Provider::Ollama => RigModelClient::ollama(self.base_url(), &self.model)?,
        };

        Ok(client)
    }

    /// Construct the model client and the service around it.
    pub fn build_service(&self) -> Result<RecommendationService> {
        let client: Arc<dyn ModelClient> = Arc::new(self.build_client()?);
        Ok(RecommendationService::new(
            client,
            self.settings(),
            self.error_mode,
        ))
    }
}
