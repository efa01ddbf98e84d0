//! Node Data Structures
//!
//! This module defines the core `Node` struct: a structured content record
//! belonging to exactly one named collection.
//!
//! # Architecture
//!
//! - **Reserved fields**: every node carries the same set of optional
//!   root-level fields (`title`, `slug`, `path`, `content`, `excerpt`,
//!   `date`) plus a required `id`
//! - **User fields**: everything collection-specific lives in the `fields`
//!   JSON object, namespaced away from the reserved fields
//! - **Read path only**: the query layer never mutates nodes; collections own
//!   them and hand out shared `Arc<Node>` references
//!
//! # Examples
//!
//! ```rust
//! use sitegraph_core::models::Node;
//! use serde_json::json;
//!
//! let post = Node::new()
//!     .with_title("Hello world")
//!     .with_path("/posts/hello-world")
//!     .with_date("2019-01-03")
//!     .with_field("author", json!({ "id": "u1" }))
//!     .with_field("rating", json!(4));
//!
//! assert_eq!(post.field_value("fields.author.id"), Some(json!("u1")));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Reserved field names that live at the record root rather than under the
/// `fields` namespace. Filter input referring to these keys translates to a
/// root-level store query path.
pub const RESERVED_FIELDS: [&str; 7] = [
    "id", "title", "date", "slug", "path", "content", "excerpt",
];

/// Validation errors for Node operations
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field value for '{0}': {1}")]
    InvalidField(String, String),
}

/// A structured content record.
///
/// All collection-specific data is stored in the `fields` object; the
/// reserved fields are shared by every collection and queried at the record
/// root. `date` keeps the source's string representation so ordering and
/// comparisons behave exactly like the authored front matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier within the owning collection
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Recency field in source format (e.g. `2019-01-03`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// User-defined fields, queried under the `fields.` path prefix
    #[serde(default)]
    pub fields: serde_json::Map<String, Value>,

    /// Timestamp when the node was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the node was last modified
    pub modified_at: DateTime<Utc>,
}

impl Node {
    /// Create an empty node with a generated UUID identifier
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Create an empty node with an explicit identifier
    pub fn with_id(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: None,
            slug: None,
            path: None,
            content: None,
            excerpt: None,
            date: None,
            fields: serde_json::Map::new(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set a user-defined field under the `fields` namespace
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Validate node invariants before it enters a collection
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` if `id` is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()));
        }
        Ok(())
    }

    /// Resolve a dotted store query path against this node.
    ///
    /// Reserved fields resolve at the root (`"date"`, `"path"`, ...); user
    /// fields resolve under the `fields` namespace (`"fields.author.id"`).
    /// Returns `None` when the path does not exist on this node, which the
    /// query layer treats as an absent value.
    pub fn field_value(&self, path: &str) -> Option<Value> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        match head {
            "id" => match rest {
                None => Some(Value::String(self.id.clone())),
                Some(_) => None,
            },
            "fields" => rest.and_then(|rest| self.user_field_value(rest)),
            _ => match rest {
                None => self.reserved_value(head),
                Some(_) => None,
            },
        }
    }

    /// Resolve a caller-facing sort field name.
    ///
    /// Reserved names sort on the record root; anything else is looked up
    /// under `fields` so callers can sort on user fields without spelling
    /// the namespace prefix.
    pub fn sort_value(&self, field: &str) -> Option<Value> {
        let head = field.split('.').next().unwrap_or(field);
        if head == "fields" || RESERVED_FIELDS.contains(&head) {
            self.field_value(field)
        } else {
            self.user_field_value(field)
        }
    }

    fn reserved_value(&self, name: &str) -> Option<Value> {
        let text = match name {
            "title" => self.title.as_ref(),
            "slug" => self.slug.as_ref(),
            "path" => self.path.as_ref(),
            "content" => self.content.as_ref(),
            "excerpt" => self.excerpt.as_ref(),
            "date" => self.date.as_ref(),
            _ => None,
        }?;
        Some(Value::String(text.clone()))
    }

    fn user_field_value(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current.clone())
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reserved_fields_resolve_at_the_root() {
        let node = Node::with_id("n1")
            .with_title("A title")
            .with_date("2020-01-01");

        assert_eq!(node.field_value("id"), Some(json!("n1")));
        assert_eq!(node.field_value("title"), Some(json!("A title")));
        assert_eq!(node.field_value("date"), Some(json!("2020-01-01")));
        assert_eq!(node.field_value("excerpt"), None);
    }

    #[test]
    fn user_fields_resolve_under_the_namespace() {
        let node = Node::with_id("n1")
            .with_field("author", json!({ "id": "u1", "name": "Ada" }))
            .with_field("rating", json!(4));

        assert_eq!(node.field_value("fields.rating"), Some(json!(4)));
        assert_eq!(node.field_value("fields.author.id"), Some(json!("u1")));
        assert_eq!(node.field_value("fields.author.missing"), None);
        // A reserved name never falls through into user fields.
        assert_eq!(node.field_value("author.id"), None);
    }

    #[test]
    fn sort_value_accepts_bare_user_field_names() {
        let node = Node::with_id("n1")
            .with_date("2020-01-01")
            .with_field("rating", json!(4));

        assert_eq!(node.sort_value("date"), Some(json!("2020-01-01")));
        assert_eq!(node.sort_value("rating"), Some(json!(4)));
        assert_eq!(node.sort_value("fields.rating"), Some(json!(4)));
    }

    #[test]
    fn validate_rejects_empty_id() {
        let node = Node::with_id("  ");
        assert!(node.validate().is_err());
        assert!(Node::new().validate().is_ok());
    }
}
