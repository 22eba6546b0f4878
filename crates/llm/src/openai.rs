use async_trait::async_trait;
use kabu_core::common::install_crypto_provider;
use kabu_core::config::LlmConfig;
use kabu_core::llm::entity::CompletionOptions;
use kabu_core::llm::error::LlmError;
use kabu_core::llm::port::LlmProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 系统角色提示，固定不变
const SYSTEM_PROMPT: &str =
    "You are a helpful financial analyst providing concise, factual stock market insights.";

/// # Summary
/// An `LlmProvider` backed by an OpenAI compatible chat completion API.
///
/// # Invariants
/// * `api_key` must be valid for `base_url`.
/// * No retry is performed; every failure is reported once.
pub struct OpenAiProvider {
    /// The HTTP client used for requests.
    client: reqwest::Client,
    /// API root, e.g. `https://api.openai.com/v1`.
    base_url: String,
    api_key: String,
    model: String,
}

/// # Summary
/// Payload structure for the `chat/completions` API.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenAiProvider {
    /// # Summary
    /// Creates a new `OpenAiProvider` from configuration.
    ///
    /// # Logic
    /// 1. Installs the rustls crypto provider.
    /// 2. Builds a client with the configured request timeout.
    ///
    /// # Arguments
    /// * `config` - LLM section of the application config, API key already injected.
    ///
    /// # Returns
    /// * A new instance of `OpenAiProvider` or `LlmError::Network` if the client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        install_crypto_provider();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    /// # Summary
    /// Sends the prompt as a single user message and returns the first choice.
    ///
    /// # Logic
    /// 1. Builds the chat request with a fixed system message.
    /// 2. Sends a POST request with bearer authentication.
    /// 3. Checks the response status.
    /// 4. Extracts the first choice's content; missing or blank content is an error.
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let payload = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        tracing::debug!(
            "LLM request: model={} max_tokens={} temperature={}",
            self.model,
            options.max_tokens,
            options.temperature
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}
