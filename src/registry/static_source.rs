//! In-memory version source for offline runs and tests

use crate::error::FetchError;
use crate::registry::VersionSource;
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Entry {
    Versions(Vec<String>),
    Failure(String),
}

/// Version source backed by a fixed module table
///
/// Unknown modules report [`FetchError::ModuleNotFound`].
#[derive(Debug, Clone, Default)]
pub struct StaticVersionSource {
    entries: HashMap<String, Entry>,
}

impl StaticVersionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the published versions of a module
    pub fn with_module<I, S>(mut self, module: &str, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(
            module.to_string(),
            Entry::Versions(versions.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Make fetches for a module fail with a network error
    pub fn with_failure(mut self, module: &str, message: &str) -> Self {
        self.entries
            .insert(module.to_string(), Entry::Failure(message.to_string()));
        self
    }
}

#[async_trait]
impl VersionSource for StaticVersionSource {
    fn source_name(&self) -> &'static str {
        "static"
    }

    async fn fetch_versions(&self, module: &str) -> Result<Vec<String>, FetchError> {
        match self.entries.get(module) {
            Some(Entry::Versions(versions)) => Ok(versions.clone()),
            Some(Entry::Failure(message)) => Err(FetchError::network(
                module,
                self.source_name(),
                message.as_str(),
            )),
            None => Err(FetchError::module_not_found(module, self.source_name())),
        }
    }
}
