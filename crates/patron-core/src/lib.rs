//! Patron Core - Conversational gateway for the loyalty assistant
//!
//! This crate holds the assistant's request-handling core:
//! - Session: per-session transcript and last-known phone number
//! - Entities: phone-number extraction from free-form messages
//! - Gateway: the model turn / tool dispatch / final answer loop
//! - Fallback: keyword-matched canned responses when no model is configured
//!
//! The gateway takes its collaborators ([`patron_llm::LlmProvider`] and the
//! tool executor's backend) by trait object, so every piece is testable
//! without network access.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod entities;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod session;

pub use entities::extract_phone_number;
pub use error::{Error, Result};
pub use fallback::fallback_response;
pub use gateway::{AssistantGateway, ChatContext, ChatReply};
pub use session::{SessionStore, TranscriptEntry, MAX_TRANSCRIPT_ENTRIES};
