//! On-demand AI impact analysis.
//!
//! Defines the `InsightProvider` trait, the credential-gated
//! `InsightService` wrapper, and an OpenAI-backed implementation.

pub mod openai;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::AudienceLevel;

/// Abstraction over remote text-completion providers.
///
/// `analyze` always returns display text: remote failures come back as
/// a string describing the error, so a failed call degrades one card
/// instead of aborting the render pass.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Generate impact analysis for one headline.
    async fn analyze(&self, headline: &str, subject: &str, level: AudienceLevel) -> String;

    /// Model identifier string.
    fn model_name(&self) -> &str;
}

/// Outcome of an insight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insight {
    /// Opaque completion text, rendered verbatim. The requested WHY/HOW
    /// labels are a formatting hint to the model, never parsed.
    Text(String),
    /// No credential is configured; the feature is disabled.
    Unavailable,
}

/// Credential gate in front of the provider.
///
/// A provider exists only when a credential was configured, so
/// unavailability is decided here — before any network attempt, not
/// discovered via a failed call.
pub struct InsightService {
    provider: Option<Box<dyn InsightProvider>>,
}

impl InsightService {
    pub fn new(provider: Box<dyn InsightProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A service with no provider: every request is `Unavailable`.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    /// Build from an optional credential. `None` yields a disabled
    /// service; this never fails startup over a missing key.
    pub fn from_credential(
        credential: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f64>,
    ) -> Result<Self> {
        match credential {
            Some(key) if !key.is_empty() => {
                let provider = openai::OpenAiInsight::new(key.into(), model, max_tokens, temperature)?;
                Ok(Self::new(Box::new(provider)))
            }
            _ => Ok(Self::disabled()),
        }
    }

    /// Whether insight generation is enabled. Drives the greyed-out
    /// state of the analyze control.
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.model_name())
    }

    pub async fn analyze(&self, headline: &str, subject: &str, level: AudienceLevel) -> Insight {
        match &self.provider {
            Some(provider) => Insight::Text(provider.analyze(headline, subject, level).await),
            None => Insight::Unavailable,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
