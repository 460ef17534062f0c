//! Server module
//!
//! Configuration loading and the axum serve loop.

mod config;
mod init;

pub use config::ServerConfig;
pub use init::run;
