//! OpenAI-compatible `/chat/completions` client (Groq by default).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::{resolve_api_key, CoachGateway};
use crate::error::GatewayError;
use crate::storage::CoachConfig;

/// HTTP gateway to a chat-completion endpoint.
pub struct ChatCompletionsGateway {
    endpoint: Url,
    api_key: Option<String>,
    model: String,
    temperature: f64,
    system_prompt: String,
    http_client: Client,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl ChatCompletionsGateway {
    /// Build a gateway with an explicit API key (`None` makes every call
    /// fail with `NotConfigured`).
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(config: &CoachConfig, api_key: Option<String>) -> Result<Self, GatewayError> {
        let base = config.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/chat/completions")).map_err(|e| {
            GatewayError::NotConfigured(format!("invalid base_url '{}': {e}", config.base_url))
        })?;

        let http_client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            endpoint,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            system_prompt: config.system_prompt.clone(),
            http_client,
        })
    }

    /// Build a gateway, resolving the key from the environment or keyring.
    pub fn from_config(config: &CoachConfig) -> Result<Self, GatewayError> {
        let api_key = resolve_api_key(&config.api_key_env).map(|(key, _)| key);
        if api_key.is_none() {
            tracing::warn!(
                "no coach API key found in ${} or the keyring; chat will use the fallback reply",
                config.api_key_env
            );
        }
        Self::new(config, api_key)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn preview_text(text: &str, max_chars: usize) -> &str {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }
}

#[async_trait]
impl CoachGateway for ChatCompletionsGateway {
    async fn complete(&self, message: &str) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GatewayError::NotConfigured("no API key available".to_string())
        })?;

        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": self.system_prompt },
                { "role": "user", "content": message },
            ],
        });

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "coach completion request");

        let resp = self
            .http_client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| Self::preview_text(&text, 200).to_string());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&text).map_err(|e| {
            GatewayError::Malformed(format!("{e}: {}", Self::preview_text(&text, 200)))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| GatewayError::Malformed("no reply content in choices".to_string()))
    }
}
