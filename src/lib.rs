//! jellyfin-mcp - Jellyfin media library tools for AI assistants
//!
//! Exposes a Jellyfin server over the Model Context Protocol as a small set
//! of tools. Each tool maps to one REST call and returns a compact,
//! allow-listed projection of the response.

pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod mcp;
pub mod projection;
pub mod types;

pub use backend::{Backend, HttpBackend};
pub use config::JellyfinConfig;
pub use dispatcher::JellyfinTools;
pub use error::{JellyfinError, Result};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
