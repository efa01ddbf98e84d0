//! Store Registry
//!
//! The store maps collection names to collection handles. It is shared
//! behind an `Arc` and supports concurrent readers; the resolver holds no
//! lock of its own.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::collection::Collection;

/// Registry of named collections
#[derive(Debug, Default)]
pub struct Store {
    collections: RwLock<HashMap<String, Arc<Collection>>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the collection with `name`, creating it if it does not exist
    pub async fn add_collection(&self, name: impl Into<String>) -> Arc<Collection> {
        let name = name.into();
        let mut collections = self.collections.write().await;
        Arc::clone(
            collections
                .entry(name.clone())
                .or_insert_with(|| Arc::new(Collection::new(name))),
        )
    }

    /// Look up a collection by name
    pub async fn collection(&self, name: &str) -> Option<Arc<Collection>> {
        self.collections.read().await.get(name).map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_collection_is_idempotent() {
        let store = Store::new();
        let first = store.add_collection("Post").await;
        let second = store.add_collection("Post").await;
        assert!(Arc::ptr_eq(&first, &second));
        assert!(store.collection("Post").await.is_some());
        assert!(store.collection("Author").await.is_none());
    }
}
