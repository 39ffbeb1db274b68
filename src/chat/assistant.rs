// src/chat/assistant.rs
// The governed path every outbound chat call takes

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::SiteConfig;
use crate::error::{ChatError, Result};

use super::backend::CompletionBackend;
use super::gemini::GeminiClient;
use super::limiter::{CallLimiter, LimiterConfig};
use super::prompt;

/// Front door for chat completions. Owns the rate limiter, the system
/// prompt, and the backend, and turns raw backend failures into the
/// user-facing error taxonomy. Callers never talk to the backend
/// directly.
pub struct Assistant {
    backend: Arc<dyn CompletionBackend>,
    limiter: Arc<CallLimiter>,
    system_prompt: String,
}

impl Assistant {
    /// Build an assistant backed by the Gemini API. A missing
    /// credential is a construction-time failure, not a per-call one.
    pub fn gemini(
        api_key: Option<String>,
        model: String,
        site: &SiteConfig,
        limits: LimiterConfig,
    ) -> Result<Self> {
        let Some(key) = api_key else {
            return Err(ChatError::missing_api_key());
        };
        let backend = Arc::new(GeminiClient::with_model(key, model));
        Ok(Self::new(backend, site, limits))
    }

    /// Build an assistant over any backend.
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        site: &SiteConfig,
        limits: LimiterConfig,
    ) -> Self {
        Self {
            backend,
            limiter: Arc::new(CallLimiter::new(limits)),
            system_prompt: prompt::system_prompt(site),
        }
    }

    /// Spawn the background task that expires the limiter's burst
    /// window while the chat sits idle.
    pub fn spawn_window_reset(&self) -> tokio::task::JoinHandle<()> {
        self.limiter.spawn_window_reset()
    }

    /// Run one user message through the governed path: admit it past
    /// the rate limiter, compose the prompt, call the backend, and
    /// classify whatever comes back.
    pub async fn request_completion(&self, message: &str) -> Result<String> {
        self.limiter.check_and_record()?;

        let full_prompt = prompt::compose(&self.system_prompt, message);
        info!(model = %self.backend.model(), "Dispatching chat completion");

        let text = match self.backend.generate(&full_prompt).await {
            Ok(text) => text,
            Err(err) => return Err(classify(err)),
        };

        // Whitespace-only replies pass through verbatim; only a truly
        // empty body counts as no response
        if text.is_empty() {
            warn!("Backend returned an empty completion");
            return Err(ChatError::EmptyResponse);
        }

        Ok(text)
    }
}

// Manual impl: `backend` is a trait object with no `Debug` bound.
impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("limiter", &self.limiter)
            .field("system_prompt", &self.system_prompt)
            .finish_non_exhaustive()
    }
}

/// Map a raw backend failure onto the user-facing error taxonomy.
fn classify(err: anyhow::Error) -> ChatError {
    if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
        if reqwest_err.is_connect() || reqwest_err.is_timeout() {
            return ChatError::Network;
        }
    }

    let message = err.to_string();
    if message.contains("API key") {
        return ChatError::invalid_api_key();
    }
    if message.contains("network") {
        return ChatError::Network;
    }
    if message.is_empty() {
        return ChatError::Unknown("An unexpected error occurred".to_string());
    }
    ChatError::Unknown(message)
}
