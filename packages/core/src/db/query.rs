//! Store Query Form and Predicate Evaluation
//!
//! A [`StoreQuery`] is the only predicate shape the store understands: a flat
//! mapping from dotted field path to a mapping of store-native operators
//! (`$eq`, `$gt`, `$regex`, ...) to operand values. The filter translator
//! produces this form; the collection chain evaluates it against each node.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;

use super::error::DatabaseError;
use crate::models::Node;

/// An operand attached to a store operator.
///
/// `$regex` operands are compiled at translation time so query execution
/// never parses patterns. Equality compares compiled patterns by their
/// source string, which makes translation idempotency assertable.
#[derive(Debug, Clone)]
pub enum ConditionValue {
    /// Plain JSON operand
    Value(Value),
    /// Compiled regular expression operand
    Pattern(Regex),
}

impl PartialEq for ConditionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Operator-to-operand mapping for a single field path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldCondition {
    ops: BTreeMap<String, ConditionValue>,
}

impl FieldCondition {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `$regex` condition with an already-compiled pattern
    pub fn regex(pattern: Regex) -> Self {
        let mut condition = Self::new();
        condition.insert("$regex", ConditionValue::Pattern(pattern));
        condition
    }

    /// A `$eq` condition
    pub fn equals(value: Value) -> Self {
        let mut condition = Self::new();
        condition.insert("$eq", ConditionValue::Value(value));
        condition
    }

    /// Attach an operator. `op` must carry the store sigil (`$eq`, not `eq`).
    pub fn insert(&mut self, op: impl Into<String>, value: ConditionValue) {
        self.ops.insert(op.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn operators(&self) -> impl Iterator<Item = (&String, &ConditionValue)> {
        self.ops.iter()
    }

    /// Evaluate every operator against the value found at `path`.
    /// All operators must hold for the condition to match.
    fn matches(&self, path: &str, actual: Option<&Value>) -> Result<bool, DatabaseError> {
        for (op, expected) in &self.ops {
            if !eval_operator(op, path, expected, actual)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Flat predicate consumed by the collection's query execution.
///
/// Keys are dotted field paths (`"date"`, `"fields.author.id"`); merging two
/// queries cannot collide because translated paths are disjoint by
/// construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreQuery {
    conditions: BTreeMap<String, FieldCondition>,
}

impl StoreQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn insert(&mut self, path: impl Into<String>, condition: FieldCondition) {
        self.conditions.insert(path.into(), condition);
    }

    /// Merge another query fragment into this one
    pub fn merge(&mut self, other: StoreQuery) {
        self.conditions.extend(other.conditions);
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&String, &FieldCondition)> {
        self.conditions.iter()
    }

    /// Whether `node` satisfies every field condition
    pub fn matches(&self, node: &Node) -> Result<bool, DatabaseError> {
        for (path, condition) in &self.conditions {
            let actual = node.field_value(path);
            if !condition.matches(path, actual.as_ref())? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn eval_operator(
    op: &str,
    path: &str,
    expected: &ConditionValue,
    actual: Option<&Value>,
) -> Result<bool, DatabaseError> {
    let value = match expected {
        ConditionValue::Value(value) => value,
        ConditionValue::Pattern(pattern) => {
            if op != "$regex" {
                return Err(DatabaseError::invalid_operand(
                    op,
                    path,
                    "pattern operand is only valid for $regex",
                ));
            }
            let matched = actual
                .and_then(Value::as_str)
                .is_some_and(|text| pattern.is_match(text));
            return Ok(matched);
        }
    };

    match op {
        // Missing values compare as null for (in)equality, so `ne` can be
        // used to exclude both a value and its absence.
        "$eq" => Ok(actual.unwrap_or(&Value::Null) == value),
        "$ne" => Ok(actual.unwrap_or(&Value::Null) != value),
        "$in" => Ok(in_set(op, path, value, actual)?),
        "$nin" => Ok(!in_set(op, path, value, actual)?),
        "$gt" => Ok(ordered(actual, value, |o| o == Ordering::Greater)),
        "$gte" => Ok(ordered(actual, value, |o| o != Ordering::Less)),
        "$lt" => Ok(ordered(actual, value, |o| o == Ordering::Less)),
        "$lte" => Ok(ordered(actual, value, |o| o != Ordering::Greater)),
        "$exists" => match value {
            Value::Bool(expected_present) => Ok(actual.is_some() == *expected_present),
            _ => Err(DatabaseError::invalid_operand(
                op,
                path,
                "expects a boolean operand",
            )),
        },
        "$regex" => Err(DatabaseError::invalid_operand(
            op,
            path,
            "expects a compiled pattern operand",
        )),
        _ => Err(DatabaseError::unsupported_operator(op, path)),
    }
}

/// Membership test for `$in`/`$nin`. A list-valued field matches when any of
/// its elements is in the operand set.
fn in_set(
    op: &str,
    path: &str,
    operand: &Value,
    actual: Option<&Value>,
) -> Result<bool, DatabaseError> {
    let set = operand
        .as_array()
        .ok_or_else(|| DatabaseError::invalid_operand(op, path, "expects an array operand"))?;

    Ok(match actual {
        Some(Value::Array(items)) => items.iter().any(|item| set.contains(item)),
        Some(value) => set.contains(value),
        None => false,
    })
}

fn ordered(actual: Option<&Value>, expected: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    actual
        .and_then(|value| compare_values(value, expected))
        .is_some_and(accept)
}

/// Strict comparison for range operators: only like-typed scalars order,
/// anything else fails the predicate rather than guessing.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Total ordering for sorting a result set by field value.
///
/// Missing values order before present ones; mixed-type values fall back to
/// their serialized representation so the sort is still deterministic.
pub(crate) fn compare_for_sort(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            compare_values(a, b).unwrap_or_else(|| a.to_string().cmp(&b.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use serde_json::json;

    fn post(date: &str, rating: i64) -> Node {
        Node::new()
            .with_date(date)
            .with_field("rating", json!(rating))
            .with_field("tags", json!(["rust", "graphs"]))
    }

    fn leaf(path: &str, op: &str, operand: Value) -> StoreQuery {
        let mut condition = FieldCondition::new();
        condition.insert(op, ConditionValue::Value(operand));
        let mut query = StoreQuery::new();
        query.insert(path, condition);
        query
    }

    #[test]
    fn equality_treats_missing_as_null() {
        let node = post("2020-01-01", 4);
        assert!(leaf("title", "$eq", Value::Null).matches(&node).unwrap());
        assert!(leaf("title", "$ne", json!("x")).matches(&node).unwrap());
        assert!(!leaf("date", "$eq", json!("2021-01-01"))
            .matches(&node)
            .unwrap());
    }

    #[test]
    fn range_operators_compare_like_types_only() {
        let node = post("2020-06-01", 4);
        assert!(leaf("fields.rating", "$gt", json!(3)).matches(&node).unwrap());
        assert!(leaf("fields.rating", "$lte", json!(4)).matches(&node).unwrap());
        assert!(leaf("date", "$gt", json!("2020-01-01")).matches(&node).unwrap());
        // Number against string never matches.
        assert!(!leaf("fields.rating", "$gt", json!("3")).matches(&node).unwrap());
        // Missing field never satisfies a range.
        assert!(!leaf("fields.missing", "$lt", json!(10)).matches(&node).unwrap());
    }

    #[test]
    fn in_matches_scalars_and_list_elements() {
        let node = post("2020-01-01", 4);
        assert!(leaf("fields.rating", "$in", json!([3, 4]))
            .matches(&node)
            .unwrap());
        assert!(leaf("fields.tags", "$in", json!(["rust"]))
            .matches(&node)
            .unwrap());
        assert!(leaf("fields.tags", "$nin", json!(["go"]))
            .matches(&node)
            .unwrap());
    }

    #[test]
    fn in_requires_an_array_operand() {
        let node = post("2020-01-01", 4);
        let err = leaf("fields.rating", "$in", json!(4))
            .matches(&node)
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidOperand { .. }));
    }

    #[test]
    fn exists_checks_presence() {
        let node = post("2020-01-01", 4);
        assert!(leaf("title", "$exists", json!(false)).matches(&node).unwrap());
        assert!(leaf("date", "$exists", json!(true)).matches(&node).unwrap());
    }

    #[test]
    fn regex_matches_string_fields() {
        let node = Node::new().with_path("/blog/first-post");
        let mut query = StoreQuery::new();
        query.insert("path", FieldCondition::regex(Regex::new("^/blog/").unwrap()));
        assert!(query.matches(&node).unwrap());

        let mut query = StoreQuery::new();
        query.insert("path", FieldCondition::regex(Regex::new("^/docs/").unwrap()));
        assert!(!query.matches(&node).unwrap());
    }

    #[test]
    fn unknown_operator_is_an_error() {
        let node = post("2020-01-01", 4);
        let err = leaf("date", "$near", json!("x")).matches(&node).unwrap_err();
        assert!(matches!(err, DatabaseError::UnsupportedOperator { .. }));
    }

    #[test]
    fn all_operators_on_a_field_must_hold() {
        let node = post("2020-06-01", 4);
        let mut condition = FieldCondition::new();
        condition.insert("$gt", ConditionValue::Value(json!("2020-01-01")));
        condition.insert("$lt", ConditionValue::Value(json!("2020-03-01")));
        let mut query = StoreQuery::new();
        query.insert("date", condition);
        assert!(!query.matches(&node).unwrap());
    }

    #[test]
    fn sort_comparison_orders_missing_first() {
        assert_eq!(compare_for_sort(None, Some(&json!(1))), Ordering::Less);
        assert_eq!(
            compare_for_sort(Some(&json!("a")), Some(&json!("b"))),
            Ordering::Less
        );
        assert_eq!(compare_for_sort(None, None), Ordering::Equal);
    }
}
