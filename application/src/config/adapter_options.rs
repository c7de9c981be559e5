//! Adapter options: argument defaults and output shape.

use serde::{Deserialize, Serialize};

/// Options shared by the adapter use cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterOptions {
    /// Chunks requested when the caller omits `top_k`.
    pub default_top_k: i64,
    /// Entries requested when the caller omits `limit` on cache listing.
    pub cache_list_limit: i64,
    /// Attach a rich-UI component tree to CI/CD payloads.
    pub rich_ui: bool,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            cache_list_limit: 50,
            rich_ui: false,
        }
    }
}

impl AdapterOptions {
    // ==================== Builder Methods ====================

    pub fn with_default_top_k(mut self, top_k: i64) -> Self {
        self.default_top_k = top_k;
        self
    }

    pub fn with_cache_list_limit(mut self, limit: i64) -> Self {
        self.cache_list_limit = limit;
        self
    }

    pub fn with_rich_ui(mut self, enabled: bool) -> Self {
        self.rich_ui = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AdapterOptions::default();
        assert_eq!(options.default_top_k, 5);
        assert_eq!(options.cache_list_limit, 50);
        assert!(!options.rich_ui);
    }

    #[test]
    fn test_builder() {
        let options = AdapterOptions::default()
            .with_default_top_k(8)
            .with_cache_list_limit(10)
            .with_rich_ui(true);
        assert_eq!(options.default_top_k, 8);
        assert_eq!(options.cache_list_limit, 10);
        assert!(options.rich_ui);
    }
}
