use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::{ollama, openai};

/// Failure of the external language model call.
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("Failed to create {provider} client: {message}")]
    Client {
        provider: &'static str,
        message: String,
    },

    #[error("Model completion failed: {0}")]
    Completion(String),
}

impl ProviderError {
    /// The underlying provider message, without this crate's wrapping.
    pub fn detail(&self) -> &str {
        match self {
            ProviderError::Client { message, .. } => message,
            ProviderError::Completion(message) => message,
        }
    }
}

/// A single completion call.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub preamble: &'a str,
    pub prompt: &'a str,
    pub temperature: f64,
    pub max_tokens: u64,
}

/// The language model collaborator. Built once at start-up and shared
/// read-only across requests.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError>;
}

/// Supported model backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    /// Together AI (OpenAI compatible chat completions)
    Together,
    /// Local Ollama server
    Ollama,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::Together => "Together AI",
            Provider::Ollama => "Ollama",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::Together => "https://api.together.xyz/v1",
            Provider::Ollama => "http://localhost:11434",
        }
    }
}

/// rig-core backed [`ModelClient`].
pub enum RigModelClient {
    Together {
        client: openai::CompletionsClient,
        model: String,
    },
    Ollama {
        client: ollama::Client,
        model: String,
    },
}

impl RigModelClient {
    pub fn together(api_key: &str, base_url: &str, model: &str) -> Result<Self, ProviderError> {
        let client = openai::Client::builder()
            .api_key(api_key)
            .base_url(base_url)
            .build()
            .map_err(|e| ProviderError::Client {
                provider: Provider::Together.name(),
                message: e.to_string(),
            })?
            .completions_api();

        Ok(RigModelClient::Together {
            client,
            model: model.to_string(),
        })
    }

    pub fn ollama(base_url: &str, model: &str) -> Result<Self, ProviderError> {
        use rig::client::Nothing;

        let client = ollama::Client::builder()
            .api_key(Nothing)
            .base_url(base_url)
            .build()
            .map_err(|e| ProviderError::Client {
                provider: Provider::Ollama.name(),
                message: e.to_string(),
            })?;

        Ok(RigModelClient::Ollama {
            client,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        match self {
            RigModelClient::Together { model, .. } | RigModelClient::Ollama { model, .. } => model,
        }
    }
}

#[async_trait]
impl ModelClient for RigModelClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        log::debug!(
            "Calling model {} (prompt: {} chars, max_tokens: {})",
            self.model(),
            request.prompt.len(),
            request.max_tokens
        );

        let response = match self {
            RigModelClient::Together { client, model } => {
                let agent = client
                    .agent(model.as_str())
                    .preamble(request.preamble)
                    .temperature(request.temperature)
                    .max_tokens(request.max_tokens)
                    .build();
                agent.prompt(request.prompt).await
            }
            RigModelClient::Ollama { client, model } => {
                let agent = client
                    .agent(model.as_str())
                    .preamble(request.preamble)
                    .temperature(request.temperature)
                    .max_tokens(request.max_tokens)
                    .build();
                agent.prompt(request.prompt).await
            }
        }
        .map_err(|e| ProviderError::Completion(e.to_string()))?;

        log::debug!("Model responded with {} chars", response.len());

        Ok(response.trim().to_string())
    }
}
