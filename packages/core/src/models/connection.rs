//! Connection Result Types
//!
//! A connection is a paginated, filtered, sorted view over a collection.
//! These types are response values: they are constructed fresh for every
//! resolution call and never stored.
//!
//! Edges expose positional neighbors *within the already-windowed page
//! slice*; `next` and `previous` never reach across page boundaries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::node::Node;

/// Ordering direction for sorted queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Ascending order (smallest first)
    Asc,
    /// Descending order (largest first)
    #[default]
    Desc,
}

impl SortOrder {
    /// Whether this order sorts descending
    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Desc)
    }
}

/// Caller-facing arguments for a connection query.
///
/// All fields are optional on the wire; missing values take the documented
/// defaults. Out-of-range paging values are clamped up, never rejected.
///
/// # Examples
///
/// ```rust
/// use sitegraph_core::models::ConnectionArgs;
///
/// let args: ConnectionArgs = serde_json::from_str(r#"{ "perPage": 10, "page": 2 }"#).unwrap();
/// assert_eq!(args.per_page, 10);
/// assert_eq!(args.page, 2);
/// assert_eq!(args.skip, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionArgs {
    /// Field to sort by; defaults to the collection's recency field
    pub sort_by: Option<String>,

    /// Sort direction (default DESC)
    pub order: SortOrder,

    /// Nodes per page (default 25, floor 1)
    pub per_page: i64,

    /// Matches to skip before the page window (default 0, floor 0)
    pub skip: i64,

    /// Page number (default 1, floor 1)
    pub page: i64,

    /// Filter input tree (nested field -> operator mappings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,

    /// Deprecated single-value regex matched against the `path` field.
    /// Use `filter` instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

impl Default for ConnectionArgs {
    fn default() -> Self {
        Self {
            sort_by: None,
            order: SortOrder::Desc,
            per_page: 25,
            skip: 0,
            page: 1,
            filter: None,
            regex: None,
        }
    }
}

/// Static metadata for one caller-facing argument
#[derive(Debug, Clone, Copy)]
pub struct ArgumentSpec {
    /// Wire name of the argument
    pub name: &'static str,
    /// Default value rendered as text, if the argument has one
    pub default_value: Option<&'static str>,
    /// Deprecation message when the argument is slated for removal
    pub deprecation: Option<&'static str>,
}

impl ArgumentSpec {
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }
}

/// Per-argument metadata for the connection arguments, including the
/// deprecation notice on the legacy `regex` argument.
pub const CONNECTION_ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec {
        name: "sortBy",
        default_value: Some("date"),
        deprecation: None,
    },
    ArgumentSpec {
        name: "order",
        default_value: Some("DESC"),
        deprecation: None,
    },
    ArgumentSpec {
        name: "perPage",
        default_value: Some("25"),
        deprecation: None,
    },
    ArgumentSpec {
        name: "skip",
        default_value: Some("0"),
        deprecation: None,
    },
    ArgumentSpec {
        name: "page",
        default_value: Some("1"),
        deprecation: None,
    },
    ArgumentSpec {
        name: "filter",
        default_value: None,
        deprecation: None,
    },
    ArgumentSpec {
        name: "regex",
        default_value: None,
        deprecation: Some("Use the filter argument instead."),
    },
];

/// A node plus its immediate neighbors within the current page slice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub node: Arc<Node>,

    /// The following node in the slice; absent for the last edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Arc<Node>>,

    /// The preceding node in the slice; absent for the first edge
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<Arc<Node>>,
}

/// Derived pagination metadata for a resolved page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    /// Always at least 1, even for an empty result set
    pub total_pages: usize,
    pub is_first: bool,
    pub is_last: bool,
}

/// The resolved connection: total count, page of edges, page metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub total_count: usize,
    pub edges: Vec<Edge>,
    pub page_info: PageInfo,
}
