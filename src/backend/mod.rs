//! Backend abstraction for reaching the Jellyfin REST API
//!
//! The dispatcher only needs one capability: perform a GET and hand back the
//! parsed JSON body. Keeping it behind a trait lets tests substitute a fake
//! server without any network access.

mod http;

pub use http::HttpBackend;

use serde_json::Value;

use crate::error::Result;

/// Query parameters for a backend request, in the order they are sent
pub type Query<'a> = [(&'a str, String)];

/// Trait for Jellyfin backends
pub trait Backend: Send + Sync {
    /// GET `path` (relative to the server base URL) and return the JSON body.
    ///
    /// Implementations map a 404 to `JellyfinError::NotFound` and any other
    /// non-success status to `JellyfinError::Api`.
    fn get(&self, path: &str, query: &Query<'_>) -> Result<Value>;
}

impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    fn get(&self, path: &str, query: &Query<'_>) -> Result<Value> {
        (**self).get(path, query)
    }
}
