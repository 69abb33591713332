//! Named connector registry.
//!
//! The registry is an explicit value callers construct, fill during startup,
//! and then share read-only. Lookups clone `Arc` handles out, so once
//! registration is done any number of tasks can resolve and use connectors
//! concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::elasticsearch::ElasticsearchConnector;
use crate::errors::ClientError;
use crate::interfaces::SearchConnector;

/// Registry of named search connectors.
///
/// Registration takes `&mut self` and is expected to happen before the
/// registry is shared; lookups take `&self`. There is no removal operation,
/// entries live as long as the registry.
#[derive(Default)]
pub struct ConnectorRegistry {
    entries: HashMap<String, Arc<dyn SearchConnector>>,
}

impl ConnectorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an Elasticsearch connector and register it under `name`,
    /// silently replacing any prior entry with the same name.
    ///
    /// # Arguments
    ///
    /// * `name` - Logical connection name callers look up later
    /// * `endpoint` - Backend base URL
    /// * `username` - Basic-auth user
    /// * `password` - Basic-auth password
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<dyn SearchConnector>)` - The handle that was stored
    /// * `Err(ClientError::TransportError)` - If the endpoint is not a valid URL
    pub fn register(
        &mut self,
        name: impl Into<String>,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<Arc<dyn SearchConnector>, ClientError> {
        let connector = ElasticsearchConnector::new(endpoint, username, password)?;
        Ok(self.insert(name, Arc::new(connector)))
    }

    /// Register a pre-built connector under `name`, silently replacing any
    /// prior entry. Used for mock implementations and connectors carrying a
    /// custom transport or configuration.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        connector: Arc<dyn SearchConnector>,
    ) -> Arc<dyn SearchConnector> {
        let name = name.into();
        debug!(name = %name, "Registering connector");
        self.entries.insert(name, connector.clone());
        connector
    }

    /// Look up a previously registered connector.
    ///
    /// Returns `None` for unknown names; callers check for absence before use.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn SearchConnector>> {
        self.entries.get(name).cloned()
    }

    /// Number of registered connectors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no connectors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchResult;
    use async_trait::async_trait;

    /// Connector stub for insertion tests.
    struct StubConnector;

    #[async_trait]
    impl SearchConnector for StubConnector {
        async fn search(&self, _index: &str, _query: &str) -> Result<SearchResult, ClientError> {
            Err(ClientError::transport("stub"))
        }

        async fn scroll_search(
            &self,
            _index: &str,
            _scroll_ttl: &str,
            _query: &str,
        ) -> Result<Vec<SearchResult>, ClientError> {
            Ok(vec![])
        }

        async fn save(&self, _index: &str, _id: &str, _document: &str) -> Result<(), ClientError> {
            Ok(())
        }

        async fn update(&self, _index: &str, _id: &str, _update: &str) -> Result<(), ClientError> {
            Ok(())
        }

        async fn delete_by_query(&self, _index: &str, _query: &str) -> Result<(), ClientError> {
            Ok(())
        }
    }

    #[test]
    fn test_register_then_lookup_returns_same_handle() {
        let mut registry = ConnectorRegistry::new();
        let registered = registry
            .register("primary", "http://localhost:9200", "elastic", "secret")
            .unwrap();

        let found = registry.lookup("primary").expect("registered name");

        assert!(Arc::ptr_eq(&registered, &found));
    }

    #[test]
    fn test_lookup_unknown_name_is_none() {
        let registry = ConnectorRegistry::new();
        assert!(registry.lookup("nowhere").is_none());
    }

    #[test]
    fn test_register_overwrites_silently() {
        let mut registry = ConnectorRegistry::new();
        let first = registry
            .register("primary", "http://one:9200", "a", "a")
            .unwrap();
        let second = registry
            .register("primary", "http://two:9200", "b", "b")
            .unwrap();

        assert_eq!(registry.len(), 1);
        let found = registry.lookup("primary").unwrap();
        assert!(Arc::ptr_eq(&second, &found));
        assert!(!Arc::ptr_eq(&first, &found));
    }

    #[test]
    fn test_register_rejects_invalid_endpoint() {
        let mut registry = ConnectorRegistry::new();

        let result = registry.register("broken", "definitely not a url", "u", "p");

        assert!(matches!(result, Err(ClientError::TransportError(_))));
        assert!(registry.lookup("broken").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_insert_stores_prebuilt_connector() {
        let mut registry = ConnectorRegistry::new();
        registry.insert("stub", Arc::new(StubConnector));

        assert!(registry.lookup("stub").is_some());
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[tokio::test]
    async fn test_looked_up_connector_is_usable() {
        let mut registry = ConnectorRegistry::new();
        registry.insert("stub", Arc::new(StubConnector));

        let connector = registry.lookup("stub").unwrap();

        connector.save("articles", "doc-1", "{}").await.unwrap();
        assert!(connector.scroll_search("articles", "1m", "{}").await.unwrap().is_empty());
    }
}
