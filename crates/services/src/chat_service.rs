use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ChatError;

/// Shown in place of a reply whenever the assistant cannot answer.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble connecting to the AI service right now. Please try again later.";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone)]
pub struct ChatConfig {
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl ChatConfig {
    /// Build a config, returning `None` when no API key is available.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::InvalidConfig` if the base URL does not parse.
    pub fn new(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Result<Option<Self>, ChatError> {
        let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) else {
            return Ok(None);
        };
        let raw_base = base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let base_url = Url::parse(raw_base.trim())
            .map_err(|e| ChatError::InvalidConfig(format!("base url {raw_base:?}: {e}")))?;
        let model = model
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.into());
        Ok(Some(Self {
            base_url,
            api_key: api_key.trim().to_owned(),
            model,
        }))
    }

    /// Read `BRAIN_AI_API_KEY`, `BRAIN_AI_MODEL` and `BRAIN_AI_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::InvalidConfig` if the base URL does not parse.
    pub fn from_env() -> Result<Option<Self>, ChatError> {
        Self::new(
            env::var("BRAIN_AI_API_KEY").ok(),
            env::var("BRAIN_AI_MODEL").ok(),
            env::var("BRAIN_AI_BASE_URL").ok(),
        )
    }

    /// `{base}/models/{model}:generateContent?key=...`
    ///
    /// # Errors
    ///
    /// Returns `ChatError::InvalidConfig` if the joined URL is malformed.
    pub fn endpoint(&self) -> Result<Url, ChatError> {
        let joined = format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model
        );
        let mut url = Url::parse(&joined).map_err(|e| ChatError::InvalidConfig(e.to_string()))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

/// Thin client for the generative-language `generateContent` endpoint.
#[derive(Clone)]
pub struct ChatService {
    client: Client,
    config: Option<ChatConfig>,
}

impl ChatService {
    /// # Errors
    ///
    /// Returns `ChatError::InvalidConfig` if the environment holds a malformed base URL.
    pub fn from_env() -> Result<Self, ChatError> {
        Ok(Self::new(ChatConfig::from_env()?))
    }

    #[must_use]
    pub fn new(config: Option<ChatConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Send one user message and return the model's text.
    ///
    /// # Errors
    ///
    /// Returns `ChatError` when the service is disabled, the request fails,
    /// or the response is empty.
    pub async fn reply(&self, message: &str) -> Result<String, ChatError> {
        let config = self.config.as_ref().ok_or(ChatError::Disabled)?;

        let response = self
            .client
            .post(config.endpoint()?)
            .json(&GenerateRequest::single_turn(message))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChatError::HttpStatus(response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        body.into_text().ok_or(ChatError::EmptyResponse)
    }

    /// Like [`ChatService::reply`], but any failure becomes [`FALLBACK_REPLY`].
    pub async fn reply_or_fallback(&self, message: &str) -> String {
        match self.reply(message).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "chat reply failed");
                FALLBACK_REPLY.to_owned()
            }
        }
    }
}

// ─── Wire format ───

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn single_turn(message: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".into(),
                parts: vec![Part {
                    text: Some(message.to_owned()),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 80,
            response_mime_type: "text/plain",
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    }
}
