//! Text-generation service abstraction.
//!
//! The orchestrators depend on [`TextGenerator`] only; the composition root
//! decides which implementation backs it.

pub mod openai;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{DzhrError, DzhrResult};
use crate::prompt::PromptPair;

pub use openai::OpenAiClient;

/// One system/user exchange constrained to a JSON object response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_output_tokens: u32,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_output_tokens,
        }
    }

    pub fn from_prompt(prompt: PromptPair, max_output_tokens: u32) -> Self {
        Self::new(prompt.system, prompt.user, max_output_tokens)
    }
}

/// A service that answers a prompt with the raw text of a JSON object.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the model's message content, or an empty string when the
    /// service answered without content.
    async fn complete_json(&self, request: CompletionRequest) -> DzhrResult<String>;
}

/// Stands in for a generator whose credentials are missing. Every call fails
/// with a configuration error before any network traffic.
#[derive(Debug, Clone)]
pub struct UnconfiguredGenerator {
    missing: &'static str,
}

impl UnconfiguredGenerator {
    pub fn new(missing: &'static str) -> Self {
        Self { missing }
    }
}

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn complete_json(&self, _request: CompletionRequest) -> DzhrResult<String> {
        Err(DzhrError::config(format!("{} is not set", self.missing)))
    }
}
