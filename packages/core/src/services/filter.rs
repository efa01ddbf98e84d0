//! Filter Predicate Translator
//!
//! Recursively converts a caller-supplied filter input tree into the flat
//! [`StoreQuery`] form the store executes, honoring each field's declared
//! capability:
//!
//! - **Leaf** fields translate their operator map under the field's dotted
//!   path
//! - **Reference** fields translate the same way but always against the
//!   related node's identity (`<path>.id`)
//! - **Nested** fields recurse with an extended path prefix
//!
//! Translation is pure: the same input always yields an equal query, and
//! nothing is partially applied on failure. Any key without a descriptor at
//! its path is a [`ConnectionError::SchemaMismatch`].

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::{Map, Value};

use super::error::ConnectionError;
use crate::db::{ConditionValue, FieldCondition, StoreQuery};
use crate::schema::FilterField;

/// Translate a filter input subtree into a flat store query.
///
/// `current` is the dotted path accumulated so far (empty at the top level
/// for reserved fields, the `fields` namespace for user fields). JSON `null`
/// values are treated as absent and skipped.
pub fn to_filter_args(
    input: &Map<String, Value>,
    fields: &BTreeMap<String, FilterField>,
    current: &str,
) -> Result<StoreQuery, ConnectionError> {
    let mut query = StoreQuery::new();

    for (key, value) in input {
        if value.is_null() {
            continue;
        }

        let path = join_path(current, key);
        let descriptor = fields.get(key).ok_or_else(|| {
            ConnectionError::schema_mismatch(path.clone(), "no filterable field with this name")
        })?;
        let object = value.as_object().ok_or_else(|| {
            ConnectionError::schema_mismatch(path.clone(), "expected a nested filter object")
        })?;

        match descriptor {
            FilterField::Leaf => {
                let condition = convert_filter_values(&path, object)?;
                if !condition.is_empty() {
                    query.insert(path.clone(), condition);
                }
            }
            FilterField::Reference => {
                let condition = convert_filter_values(&path, object)?;
                if !condition.is_empty() {
                    query.insert(format!("{path}.id"), condition);
                }
            }
            FilterField::Nested(sub_fields) => {
                query.merge(to_filter_args(object, sub_fields, &path)?);
            }
        }
    }

    Ok(query)
}

/// Convert one leaf operator map into a field condition, prefixing every
/// operator with the store sigil and compiling `regex` operands.
fn convert_filter_values(
    path: &str,
    input: &Map<String, Value>,
) -> Result<FieldCondition, ConnectionError> {
    let mut condition = FieldCondition::new();

    for (name, operand) in input {
        if operand.is_null() {
            continue;
        }

        let op = store_operator(name).ok_or_else(|| {
            ConnectionError::schema_mismatch(
                format!("{path}.{name}"),
                "unsupported filter operator",
            )
        })?;

        let value = if op == "$regex" {
            ConditionValue::Pattern(compile_pattern(path, operand)?)
        } else {
            ConditionValue::Value(operand.clone())
        };
        condition.insert(op, value);
    }

    Ok(condition)
}

/// Compile a caller-supplied regex operand at translation time
pub(crate) fn compile_pattern(path: &str, operand: &Value) -> Result<Regex, ConnectionError> {
    let pattern = operand.as_str().ok_or_else(|| {
        ConnectionError::schema_mismatch(path, "regex operand must be a string")
    })?;
    Regex::new(pattern)
        .map_err(|err| ConnectionError::schema_mismatch(path, format!("invalid regex: {err}")))
}

/// Map a caller-facing operator name to its sigiled store operator.
/// Long and short spellings are both accepted.
fn store_operator(name: &str) -> Option<&'static str> {
    match name {
        "eq" | "equals" => Some("$eq"),
        "ne" | "notEquals" => Some("$ne"),
        "in" => Some("$in"),
        "nin" | "notIn" => Some("$nin"),
        "gt" | "greaterThan" => Some("$gt"),
        "gte" | "greaterThanOrEqual" => Some("$gte"),
        "lt" | "lessThan" => Some("$lt"),
        "lte" | "lessThanOrEqual" => Some("$lte"),
        "regex" => Some("$regex"),
        "exists" => Some("$exists"),
        _ => None,
    }
}

fn join_path(current: &str, key: &str) -> String {
    if current.is_empty() {
        key.to_string()
    } else {
        format!("{current}.{key}")
    }
}
