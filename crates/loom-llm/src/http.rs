use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::client::LlmClient;
use crate::config::{Endpoints, LlmConfig, ResponseFormat};
use crate::error::{LlmError, LlmResult};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// Chat-completions client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    endpoints: Endpoints,
    timeout: Duration,
}

impl HttpClient {
    /// Create a client with the given endpoints and per-request timeout.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> LlmResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoints,
            timeout,
        })
    }

    /// Create a client from environment variables with the default timeout.
    pub fn from_env() -> LlmResult<Self> {
        Self::new(Endpoints::from_env(), DEFAULT_TIMEOUT)
    }

    /// The configured endpoints.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

impl LlmClient for HttpClient {
    fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
        config: &LlmConfig,
    ) -> LlmResult<String> {
        let endpoint = self.endpoints.select(config);
        let body = ChatRequest::new(system_prompt, user_message, config);

        tracing::debug!(
            model = %config.model,
            url = %endpoint.completions_url(),
            "sending chat completion"
        );

        let mut request = self.client.post(endpoint.completions_url()).json(&body);
        if let Some(key) = &endpoint.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout)
            } else {
                LlmError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response.text().map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout)
            } else {
                LlmError::Transport(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(LlmError::Transport(format!("{status}: {text}")));
        }

        let content = parse_completion(&text)?;
        tracing::debug!(chars = content.len(), "received chat completion");
        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<FormatSpec>,
}

impl<'a> ChatRequest<'a> {
    fn new(system_prompt: &'a str, user_message: &'a str, config: &'a LlmConfig) -> Self {
        Self {
            model: &config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
            frequency_penalty: config.frequency_penalty,
            presence_penalty: config.presence_penalty,
            response_format: match config.response_format {
                ResponseFormat::Text => None,
                ResponseFormat::JsonObject => Some(FormatSpec {
                    kind: "json_object",
                }),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct FormatSpec {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the first choice's text out of a chat-completions response body.
fn parse_completion(body: &str) -> LlmResult<String> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or(LlmError::EmptyResponse)
}
