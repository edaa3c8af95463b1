//! Go module proxy source
//!
//! Lists published versions through the module proxy protocol:
//! - List versions: {proxy}/{escaped module}/@v/list
//! - Latest fallback: {proxy}/{escaped module}/@latest

use crate::error::FetchError;
use crate::registry::{HttpClient, VersionSource};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Public Go module proxy
pub const DEFAULT_GO_PROXY: &str = "https://proxy.golang.org";

/// Go module proxy version source
pub struct GoProxySource {
    client: HttpClient,
    base_url: String,
}

/// `@latest` response
#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(rename = "Version")]
    version: String,
}

impl GoProxySource {
    /// Create a source for the proxy selected by `$GOPROXY`
    pub fn new(client: HttpClient) -> Self {
        let goproxy = std::env::var("GOPROXY").ok();
        Self::with_base_url(client, proxy_from_env(goproxy.as_deref()))
    }

    /// Create a source for an explicit proxy URL
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Proxy URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_url(&self, module: &str) -> String {
        format!("{}/{}/@v/list", self.base_url, escape_module_path(module))
    }

    fn latest_url(&self, module: &str) -> String {
        format!("{}/{}/@latest", self.base_url, escape_module_path(module))
    }
}

#[async_trait]
impl VersionSource for GoProxySource {
    fn source_name(&self) -> &'static str {
        "Go Proxy"
    }

    async fn fetch_versions(&self, module: &str) -> Result<Vec<String>, FetchError> {
        let body = self
            .client
            .get_text(&self.list_url(module), module, self.source_name())
            .await?;

        let versions = parse_version_list(&body);
        if !versions.is_empty() {
            return Ok(versions);
        }

        // Modules without tags only publish pseudo-versions through @latest,
        // which file-based proxies and some mirrors do not serve
        debug!(module, "empty version list, asking @latest");
        let latest = self
            .client
            .get_json::<LatestResponse>(&self.latest_url(module), module, self.source_name())
            .await;
        match latest {
            Ok(latest) => Ok(vec![latest.version]),
            Err(FetchError::ModuleNotFound { .. }) => {
                debug!(module, "no @latest either, nothing to compare");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Pick the proxy URL from a `GOPROXY` value
///
/// Entries are separated by `,` or `|`; the first HTTP(S) entry wins.
/// `direct`, `off` and an unset variable fall back to the public proxy.
pub fn proxy_from_env(value: Option<&str>) -> String {
    value
        .into_iter()
        .flat_map(|v| v.split([',', '|']))
        .map(str::trim)
        .find(|entry| entry.starts_with("https://") || entry.starts_with("http://"))
        .map(|entry| entry.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_GO_PROXY.to_string())
}

/// Escape a module path for proxy URLs: uppercase letters become `!` + lowercase
pub fn escape_module_path(module: &str) -> String {
    let mut escaped = String::with_capacity(module.len());
    for ch in module.chars() {
        if ch.is_uppercase() {
            escaped.push('!');
            escaped.extend(ch.to_lowercase());
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

fn parse_version_list(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            // Some proxies append a timestamp after the version
            line.split_whitespace()
                .next()
                .unwrap_or(line)
                .to_string()
        })
        .collect()
}
