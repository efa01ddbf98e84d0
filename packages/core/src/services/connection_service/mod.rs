//! Connection Service - Paginated, Filterable Node Connections
//!
//! The public entry point of the query core. Given a collection name and
//! caller arguments, the service translates the filter input into a store
//! query, executes it (filter, sort, offset, limit), computes pagination
//! metadata, and assembles the edge view with positional neighbors.
//!
//! # Resolution flow
//!
//! 1. Look up the collection's schema and handle
//! 2. Normalize paging inputs (clamping, never rejecting)
//! 3. Build the store query: legacy `regex` branch, then the two filter
//!    translation passes (reserved fields at the record root, user fields
//!    under the `fields` namespace)
//! 4. Execute the chain and count the filtered matches
//! 5. Derive page info and assemble edges from the windowed slice
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use serde_json::json;
//! use sitegraph_core::db::Store;
//! use sitegraph_core::models::ConnectionArgs;
//! use sitegraph_core::schema::{CollectionSchema, FilterField, SchemaRegistry};
//! use sitegraph_core::services::ConnectionService;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = Arc::new(Store::new());
//! let mut schemas = SchemaRegistry::new();
//! schemas.register(
//!     "Post",
//!     CollectionSchema::new().with_field("author", FilterField::Reference),
//! );
//!
//! let service = ConnectionService::new(store, schemas);
//! let args = ConnectionArgs {
//!     filter: Some(json!({ "author": { "equals": "u1" } })),
//!     ..Default::default()
//! };
//! let connection = service.resolve("Post", &args).await?;
//! println!("{} posts", connection.total_count);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde_json::Map;

use super::error::ConnectionError;
use super::filter::{compile_pattern, to_filter_args};
use super::pagination;
use crate::db::{FieldCondition, Store, StoreQuery};
use crate::models::{Connection, ConnectionArgs, Edge, RESERVED_FIELDS};
use crate::schema::{CollectionSchema, SchemaRegistry, FIELDS_NAMESPACE};

/// Service resolving paginated, filtered connections over collections
pub struct ConnectionService {
    store: Arc<Store>,
    schemas: SchemaRegistry,
}

impl ConnectionService {
    /// Create a new ConnectionService over a store and its schemas
    pub fn new(store: Arc<Store>, schemas: SchemaRegistry) -> Self {
        Self { store, schemas }
    }

    /// Resolve a connection for the named collection.
    ///
    /// # Errors
    ///
    /// - [`ConnectionError::UnknownCollection`] if no schema or collection
    ///   is registered under `collection_name`
    /// - [`ConnectionError::SchemaMismatch`] if the filter references an
    ///   undeclared field, an unsupported operator, or an invalid regex;
    ///   the request is rejected as a whole
    /// - [`ConnectionError::StoreExecution`] if query evaluation fails
    pub async fn resolve(
        &self,
        collection_name: &str,
        args: &ConnectionArgs,
    ) -> Result<Connection, ConnectionError> {
        let schema = self
            .schemas
            .get(collection_name)
            .ok_or_else(|| ConnectionError::unknown_collection(collection_name))?;
        let collection = self
            .store
            .collection(collection_name)
            .await
            .ok_or_else(|| ConnectionError::unknown_collection(collection_name))?;

        let query = build_query(schema, args)?;
        let sort_by = args
            .sort_by
            .as_deref()
            .unwrap_or_else(|| schema.default_sort_field());
        let window = pagination::window(args.page, args.per_page, args.skip);

        let matches = collection
            .chain()
            .await
            .find(&query)
            .map_err(|err| ConnectionError::store_execution(collection_name, err))?;
        let total_matching = matches.len();

        let nodes = matches
            .sort(sort_by, args.order.is_descending())
            .offset(window.offset)
            .limit(window.limit)
            .data();

        let (total_count, page_info) =
            pagination::page_info(args.page, args.per_page, args.skip, total_matching);

        let edges: Vec<Edge> = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| Edge {
                node: Arc::clone(node),
                next: nodes.get(index + 1).map(Arc::clone),
                previous: index
                    .checked_sub(1)
                    .and_then(|previous| nodes.get(previous))
                    .map(Arc::clone),
            })
            .collect();

        tracing::debug!(
            collection = collection_name,
            total_count,
            current_page = page_info.current_page,
            edges = edges.len(),
            "resolved connection"
        );

        Ok(Connection {
            total_count,
            edges,
            page_info,
        })
    }
}

/// Build the store query from the legacy regex argument and the filter tree.
///
/// Reserved fields translate at the record root; everything else translates
/// under the `fields` namespace. The two fragments merge without collisions
/// because their paths are disjoint.
fn build_query(
    schema: &CollectionSchema,
    args: &ConnectionArgs,
) -> Result<StoreQuery, ConnectionError> {
    let mut query = StoreQuery::new();

    // Deprecated compatibility branch: a bare regex argument only ever
    // matched the `path` field. Kept functioning, not extended.
    if let Some(pattern) = &args.regex {
        let compiled = compile_pattern("regex", &serde_json::Value::String(pattern.clone()))?;
        query.insert("path", FieldCondition::regex(compiled));
    }

    if let Some(filter) = &args.filter {
        let input = filter.as_object().ok_or_else(|| {
            ConnectionError::schema_mismatch("filter", "filter must be an object")
        })?;

        let mut internals = Map::new();
        let mut user_fields = Map::new();
        for (key, value) in input {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                internals.insert(key.clone(), value.clone());
            } else {
                user_fields.insert(key.clone(), value.clone());
            }
        }

        query.merge(to_filter_args(&user_fields, schema.fields(), FIELDS_NAMESPACE)?);
        query.merge(to_filter_args(&internals, schema.fields(), "")?);
    }

    Ok(query)
}
