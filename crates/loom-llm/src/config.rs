use serde::{Deserialize, Serialize};

/// Model used when an agent does not name one.
pub const DEFAULT_MODEL: &str = "lmstudio-community/Meta-Llama-3-8B-Instruct-GGUF";

/// Base URL of the local OpenAI-compatible server (LM Studio).
pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:1234/v1";

/// API key the local server expects.
pub const DEFAULT_LOCAL_API_KEY: &str = "lm-studio";

/// Base URL of the hosted endpoint.
pub const DEFAULT_HOSTED_BASE_URL: &str = "https://api.openai.com/v1";

/// Models served by the hosted endpoint rather than the local one.
pub const HOSTED_MODELS: &[&str] = &["gpt-3.5-turbo", "gpt-4-turbo", "gpt-4", "gpt-4o"];

/// Expected shape of the model's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text.
    #[default]
    Text,
    /// A single JSON object.
    JsonObject,
}

/// Sampling parameters for one agent. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of tokens in the reply.
    pub max_tokens: u32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
    /// Penalty for repeated tokens.
    pub frequency_penalty: f32,
    /// Penalty for tokens already present.
    pub presence_penalty: f32,
    /// Expected reply shape.
    pub response_format: ResponseFormat,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 500,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            response_format: ResponseFormat::Text,
        }
    }
}

impl LlmConfig {
    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the reply token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the expected reply shape.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Whether the hosted endpoint serves this model.
    pub fn is_hosted(&self) -> bool {
        HOSTED_MODELS.contains(&self.model.as_str())
    }
}

/// Where to send a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Bearer token, if the endpoint needs one.
    pub api_key: Option<String>,
}

impl Endpoint {
    /// Create an endpoint.
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// The chat-completions URL.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// The local and hosted endpoints. The model name picks one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Local server for everything not in [`HOSTED_MODELS`].
    pub local: Endpoint,
    /// Hosted API for [`HOSTED_MODELS`].
    pub hosted: Endpoint,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            local: Endpoint::new(
                DEFAULT_LOCAL_BASE_URL,
                Some(DEFAULT_LOCAL_API_KEY.to_string()),
            ),
            hosted: Endpoint::new(DEFAULT_HOSTED_BASE_URL, None),
        }
    }
}

impl Endpoints {
    /// Endpoints from the environment.
    ///
    /// Reads `LOOM_LOCAL_BASE_URL`, `LOOM_HOSTED_BASE_URL`, and
    /// `OPENAI_API_KEY`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let local_url = std::env::var("LOOM_LOCAL_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_LOCAL_BASE_URL.to_string());
        let hosted_url = std::env::var("LOOM_HOSTED_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_HOSTED_BASE_URL.to_string());

        Self {
            local: Endpoint::new(&local_url, defaults.local.api_key),
            hosted: Endpoint::new(&hosted_url, std::env::var("OPENAI_API_KEY").ok()),
        }
    }

    /// The endpoint serving `config.model`.
    pub fn select(&self, config: &LlmConfig) -> &Endpoint {
        if config.is_hosted() {
            &self.hosted
        } else {
            &self.local
        }
    }
}
