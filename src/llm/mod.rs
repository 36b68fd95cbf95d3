//! Text-Completion Collaborator
//!
//! Unified interface for the generative-text service used by the prioritizer,
//! the typonym generator and the strategy summarizer. Every caller treats a
//! completion failure as recoverable: validation failures and transport
//! errors trigger deterministic fallbacks, never a pipeline fault.

use anyhow::Result;
use async_trait::async_trait;

mod gemini;
pub mod templates;

pub use gemini::GeminiClient;

/// Unified trait for text-completion backends.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Generate a completion for the prompt. May fail on timeout, quota or an
    /// empty/malformed response; callers must recover locally.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}
