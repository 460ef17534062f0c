//! Patron Tools - Loyalty assistant tool dispatch
//!
//! This crate defines the closed set of tools the assistant can call and
//! executes them against the loyalty backend's generic tool endpoint
//! (`POST /mcp/tool`):
//! - Kind: enumerated tool set with parameter schemas
//! - Backend: trait over the backend tool endpoint (HTTP implementation
//!   included, test doubles substitute at the trait)
//! - Executor: dispatch, argument re-validation, and error normalization
//!
//! Execution never fails at the type level: every backend problem becomes a
//! [`ToolResult`] carrying a user-presentable error, because the result text
//! is relayed through the model back to a customer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod executor;
pub mod kind;
pub mod phone;

pub use backend::{BackendError, HttpMcpBackend, McpBackend};
pub use error::{Error, Result};
pub use executor::{ToolExecutor, ToolResult};
pub use kind::ToolKind;
pub use phone::is_valid_phone;
