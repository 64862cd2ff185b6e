//! reqwest-based Jellyfin backend

use serde_json::Value;

use super::{Backend, Query};
use crate::config::JellyfinConfig;
use crate::error::{JellyfinError, Result};

/// Longest error body echoed back to the caller
const MAX_ERROR_BODY: usize = 200;

/// Jellyfin API client
///
/// Holds one connection pool for the whole process and a single-threaded
/// runtime that drives each request to completion from the synchronous
/// stdio loop.
pub struct HttpBackend {
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    base_url: String,
    api_key: String,
}

impl HttpBackend {
    /// Create a new client; every request is bounded by `config.timeout`
    pub fn new(config: &JellyfinConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("jellyfin-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            client,
            runtime,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Async GET with `api_key` auth
    pub async fn get_async(&self, path: &str, query: &Query<'_>) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(path, "Jellyfin request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(JellyfinError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = truncate(body.trim(), MAX_ERROR_BODY);
            tracing::warn!(path, status = status.as_u16(), "Jellyfin request failed");
            return Err(JellyfinError::Api {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    message
                },
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Backend for HttpBackend {
    fn get(&self, path: &str, query: &Query<'_>) -> Result<Value> {
        self.runtime.block_on(self.get_async(path, query))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
