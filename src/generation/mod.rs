//! Section drafting with a chat completion model
//!
//! Components:
//! - Client: OpenAI-compatible chat completions
//! - Prompt: numbered reference context and project details
//! - Section: one completion call per tender section

pub mod client;
pub mod prompt;
pub mod section;

// Re-export key types
pub use client::{ChatMessage, CompletionClient, CompletionRequest, OpenAiChatClient, DEFAULT_CHAT_MODEL};
pub use section::{SectionGenerator, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
