//! In-Memory Node Collections
//!
//! A [`Collection`] is a named, queryable set of nodes. Collections are
//! read-mostly: many resolvers may query the same collection concurrently,
//! so nodes are stored as shared `Arc<Node>` references behind an async
//! `RwLock` and every query starts from a snapshot taken under the read lock.
//!
//! Queries use a chain API in execution order:
//!
//! ```rust,no_run
//! # use sitegraph_core::db::{Collection, StoreQuery};
//! # async fn example(collection: &Collection) -> anyhow::Result<()> {
//! let nodes = collection
//!     .chain()
//!     .await
//!     .find(&StoreQuery::new())?
//!     .sort("date", true)
//!     .offset(25)
//!     .limit(25)
//!     .data();
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::DatabaseError;
use super::query::{compare_for_sort, StoreQuery};
use crate::models::{Node, ValidationError};

/// A named, queryable set of nodes
#[derive(Debug, Default)]
pub struct Collection {
    name: String,
    nodes: RwLock<Vec<Arc<Node>>>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a node to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the node fails its invariants.
    pub async fn insert(&self, node: Node) -> Result<Arc<Node>, ValidationError> {
        node.validate()?;
        let node = Arc::new(node);
        self.nodes.write().await.push(Arc::clone(&node));
        tracing::trace!(collection = %self.name, node = %node.id, "inserted node");
        Ok(node)
    }

    /// Unconditional count of all nodes in the collection
    pub async fn count(&self) -> usize {
        self.nodes.read().await.len()
    }

    /// Start a query chain over a snapshot of the current nodes
    pub async fn chain(&self) -> Chain {
        Chain {
            nodes: self.nodes.read().await.clone(),
        }
    }
}

/// A query chain over a collection snapshot.
///
/// Each step consumes the chain and returns the narrowed one, in the order
/// the store executes: filter, sort, offset, limit.
#[derive(Debug, Clone)]
pub struct Chain {
    nodes: Vec<Arc<Node>>,
}

impl Chain {
    /// Keep only nodes matching the query
    pub fn find(self, query: &StoreQuery) -> Result<Self, DatabaseError> {
        let mut matched = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            if query.matches(&node)? {
                matched.push(node);
            }
        }
        Ok(Self { nodes: matched })
    }

    /// Stable sort by a single field; `descending` reverses the order
    pub fn sort(mut self, field: &str, descending: bool) -> Self {
        self.nodes.sort_by(|a, b| {
            let ordering = compare_for_sort(a.sort_value(field).as_ref(), b.sort_value(field).as_ref());
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        self
    }

    /// Drop the first `n` nodes
    pub fn offset(mut self, n: usize) -> Self {
        if n > 0 {
            self.nodes.drain(..n.min(self.nodes.len()));
        }
        self
    }

    /// Keep at most `n` nodes
    pub fn limit(mut self, n: usize) -> Self {
        self.nodes.truncate(n);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consume the chain, returning the remaining nodes in order
    pub fn data(self) -> Vec<Arc<Node>> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FieldCondition;
    use serde_json::json;

    async fn seeded() -> Collection {
        let collection = Collection::new("Post");
        for (id, date) in [("a", "2020-01-01"), ("b", "2020-03-01"), ("c", "2020-02-01")] {
            collection
                .insert(Node::with_id(id).with_date(date))
                .await
                .unwrap();
        }
        collection
    }

    #[tokio::test]
    async fn sort_orders_by_field_both_directions() {
        let collection = seeded().await;

        let ascending: Vec<_> = collection
            .chain()
            .await
            .sort("date", false)
            .data()
            .iter()
            .map(|n| n.id.clone())
            .collect();
        assert_eq!(ascending, vec!["a", "c", "b"]);

        let descending: Vec<_> = collection
            .chain()
            .await
            .sort("date", true)
            .data()
            .iter()
            .map(|n| n.id.clone())
            .collect();
        assert_eq!(descending, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn offset_and_limit_window_the_chain() {
        let collection = seeded().await;
        let chain = collection.chain().await.sort("date", false);

        assert_eq!(chain.clone().offset(1).limit(1).data()[0].id, "c");
        assert!(chain.clone().offset(10).data().is_empty());
        assert_eq!(chain.limit(0).len(), 0);
    }

    #[tokio::test]
    async fn find_filters_by_store_query() {
        let collection = seeded().await;
        let mut query = StoreQuery::new();
        query.insert("date", FieldCondition::equals(json!("2020-02-01")));

        let matches = collection.chain().await.find(&query).unwrap().data();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "c");
    }

    #[tokio::test]
    async fn insert_validates_nodes() {
        let collection = Collection::new("Post");
        assert!(collection.insert(Node::with_id("")).await.is_err());
        assert_eq!(collection.count().await, 0);
    }
}
