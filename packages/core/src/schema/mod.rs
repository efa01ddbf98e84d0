//! Filter Capability Schema
//!
//! Schema metadata declaring how each field of a collection may be filtered.
//! Every key in a caller's filter input must correspond to exactly one
//! [`FilterField`] descriptor at that path; the translator rejects anything
//! else as a schema mismatch.
//!
//! Dispatch is a tagged variant with exhaustive matching rather than runtime
//! type inspection, so a descriptor can never have an "unexpected shape".

use std::collections::{BTreeMap, HashMap};

use crate::models::RESERVED_FIELDS;

/// Path prefix under which user-defined fields live in the store
pub const FIELDS_NAMESPACE: &str = "fields";

/// Default recency field used when a caller does not pass `sortBy`
pub const DEFAULT_SORT_FIELD: &str = "date";

/// Filter capability of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterField {
    /// Scalar field supporting the full comparison operator set
    Leaf,
    /// Relation field; equality and friends resolve against the related
    /// node's identity (`<path>.id`), never the full related object
    Reference,
    /// Structured sub-object with its own descriptor tree
    Nested(BTreeMap<String, FilterField>),
}

impl FilterField {
    /// Build a `Nested` descriptor from `(name, descriptor)` pairs
    pub fn nested<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FilterField)>,
        K: Into<String>,
    {
        Self::Nested(
            fields
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
        )
    }
}

/// Per-collection field-capability map.
///
/// New schemas come preloaded with the reserved fields as `Leaf` descriptors,
/// mirroring the record root; user fields are added with [`with_field`].
///
/// [`with_field`]: CollectionSchema::with_field
///
/// # Examples
///
/// ```rust
/// use sitegraph_core::schema::{CollectionSchema, FilterField};
///
/// let schema = CollectionSchema::new()
///     .with_field("author", FilterField::Reference)
///     .with_field("rating", FilterField::Leaf)
///     .with_field("meta", FilterField::nested([("featured", FilterField::Leaf)]));
///
/// assert!(schema.field("title").is_some()); // reserved fields are preloaded
/// assert!(schema.field("unknown").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSchema {
    fields: BTreeMap<String, FilterField>,
    default_sort_field: String,
}

impl CollectionSchema {
    pub fn new() -> Self {
        let fields = RESERVED_FIELDS
            .iter()
            .map(|name| ((*name).to_string(), FilterField::Leaf))
            .collect();
        Self {
            fields,
            default_sort_field: DEFAULT_SORT_FIELD.to_string(),
        }
    }

    /// Declare a user-defined filterable field
    pub fn with_field(mut self, name: impl Into<String>, field: FilterField) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Override the recency field used as the default sort
    pub fn with_default_sort_field(mut self, name: impl Into<String>) -> Self {
        self.default_sort_field = name.into();
        self
    }

    pub fn field(&self, name: &str) -> Option<&FilterField> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, FilterField> {
        &self.fields
    }

    pub fn default_sort_field(&self) -> &str {
        &self.default_sort_field
    }
}

impl Default for CollectionSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry mapping collection name to its filter capability schema
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, CollectionSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the schema for a collection
    pub fn register(&mut self, collection: impl Into<String>, schema: CollectionSchema) {
        self.schemas.insert(collection.into(), schema);
    }

    pub fn get(&self, collection: &str) -> Option<&CollectionSchema> {
        self.schemas.get(collection)
    }
}
