// src/chat/backend.rs
// Completion backend abstraction

use anyhow::Result;
use async_trait::async_trait;

/// Anything that can turn a fully composed prompt into reply text.
///
/// Backends report transport and status failures as plain `anyhow`
/// errors; classifying them into user-facing chat errors is the
/// assistant's job, not the backend's.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one prompt and return the raw reply text.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
