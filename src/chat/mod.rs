// src/chat/mod.rs
// Gemini-backed portfolio chat: rate limiting, prompt, session flow

pub mod assistant;
pub mod backend;
pub mod gemini;
pub mod limiter;
pub mod prompt;
pub mod session;

pub use assistant::Assistant;
pub use backend::CompletionBackend;
pub use gemini::GeminiClient;
pub use limiter::{CallLimiter, LimiterConfig};
pub use session::{ChatMessage, ChatSession, MessageStatus, Sender};
