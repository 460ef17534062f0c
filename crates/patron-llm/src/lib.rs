//! Patron LLM - LLM Provider Abstraction
//!
//! This crate provides the generative-AI integration for Patron:
//! - Provider: trait definition for chat completion with tool calling
//! - Gemini: Google Gemini provider (reqwest-based, function calling)
//!
//! The assistant gateway only depends on the [`LlmProvider`] trait, so tests
//! can substitute a scripted provider without any network access.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod gemini;
pub mod message;
pub mod provider;
pub mod tools;

pub use error::{Error, Result};
pub use gemini::{GeminiConfig, GeminiProvider, DEFAULT_MODEL};
pub use message::{Message, MessageRole};
pub use provider::{
    CompletionRequest, LlmProvider, TokenUsage, ToolCompletionRequest, ToolCompletionResponse,
};
pub use tools::{ToolCall, ToolChoice, ToolDefinition};
