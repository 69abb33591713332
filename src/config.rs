//! Configuration types for search connectors.

/// Configuration for a search connector.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Maximum number of pages a single scroll may accumulate.
    /// Set to None to disable the bound (not recommended for production).
    pub max_scroll_pages: Option<usize>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            max_scroll_pages: Some(1000),
        }
    }
}

impl ConnectorConfig {
    /// Create a config with no scroll page bound (use with caution).
    pub fn unlimited() -> Self {
        Self {
            max_scroll_pages: None,
        }
    }

    /// Create a config with a custom scroll page bound.
    pub fn with_max_scroll_pages(max_scroll_pages: usize) -> Self {
        Self {
            max_scroll_pages: Some(max_scroll_pages),
        }
    }
}
