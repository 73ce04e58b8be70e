//! OpenAI-backed insight generation.
//!
//! Implements the `InsightProvider` trait against the Chat Completions
//! API: one user-role prompt message, temperature, single attempt.
//! Nothing is retried — a failed call becomes inline display text on
//! the requesting card.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::InsightProvider;
use crate::types::{AudienceLevel, FinSmartError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 512;
const DEFAULT_TEMPERATURE: f64 = 0.7;

// ---------------------------------------------------------------------------
// API types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChatMessage>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct OpenAiInsight {
    http: Client,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl OpenAiInsight {
    pub fn new(
        api_key: SecretString,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f64>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to build OpenAI HTTP client")?;

        Ok(Self {
            http,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_tokens: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
        })
    }

    /// Build the analysis prompt for a headline.
    ///
    /// The WHY/HOW labels are a readability hint to the model; the
    /// response stays opaque free text and is never parsed.
    pub fn build_prompt(headline: &str, subject: &str, level: AudienceLevel) -> String {
        let register = match level {
            AudienceLevel::Beginner => {
                "Write for a complete newcomer to markets. Plain language, no jargon."
            }
            AudienceLevel::Intermediate => {
                "Write for a reader with some market knowledge. Define any advanced terms."
            }
            AudienceLevel::Expert => {
                "Write for a professional. Use precise market terminology and be concise."
            }
        };

        format!(
            "You are a financial analyst. A story just broke about {subject}:\n\
             \"{headline}\"\n\n\
             {register}\n\n\
             Respond with two short labeled sections:\n\
             WHY: why this matters for {subject}.\n\
             HOW: how it could move the price in the near term."
        )
    }

    /// Send the completion request. Single attempt by design.
    async fn call_api(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post(OPENAI_API_URL)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("OpenAI request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error {status}: {error_text}");
        }

        let body: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        let text = body
            .choices
            .first()
            .and_then(|c| c.message.as_ref())
            .map(|m| m.content.trim().to_string())
            .unwrap_or_default();

        Ok(text)
    }
}

#[async_trait]
impl InsightProvider for OpenAiInsight {
    async fn analyze(&self, headline: &str, subject: &str, level: AudienceLevel) -> String {
        let prompt = Self::build_prompt(headline, subject, level);
        debug!(subject, model = %self.model, %level, "Generating insight");

        match self.call_api(&prompt).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "Insight unavailable: the model returned an empty response.".to_string(),
            Err(e) => {
                warn!(subject, error = %e, "Insight generation failed");
                FinSmartError::Insight {
                    model: self.model.clone(),
                    message: e.to_string(),
                }
                .to_string()
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
