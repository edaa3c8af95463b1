//! Version sources for fetching published module versions
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - Go module proxy source
//! - In-memory source for offline use

mod client;
mod go_proxy;
mod static_source;

pub use client::{HttpClient, RetryPolicy};
pub use go_proxy::{escape_module_path, proxy_from_env, GoProxySource, DEFAULT_GO_PROXY};
pub use static_source::StaticVersionSource;

use crate::error::FetchError;
use async_trait::async_trait;

/// Something that can list the published versions of a module
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Name used in error messages
    fn source_name(&self) -> &'static str;

    /// Fetch raw version strings for a module
    async fn fetch_versions(&self, module: &str) -> Result<Vec<String>, FetchError>;
}
