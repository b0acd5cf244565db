//! Predicate-driven discovery of values inside a JSON tree.
//!
//! [`collect`] walks mappings and sequences depth-first in document order.
//! At every mapping node the predicate is consulted first: returning
//! `Some(values)` extracts those values and stops the descent into that
//! node, returning `None` lets the walk continue into the node's members.
//!
//! The two predicates the rest of the system needs are [`pagination_cursors`]
//! (timeline continuation tokens) and [`named_fields`] (entity names).

use serde_json::{Map, Value};

use crate::tree::MAX_DEPTH;

/// Discriminator value that marks a pagination cursor node.
pub const CURSOR_TYPE: &str = "TimelineTimelineCursor";

/// Collect every value the predicate extracts, in document order of first
/// encounter. Nodes nested beyond [`MAX_DEPTH`] are not visited.
pub fn collect<F>(tree: &Value, predicate: &F) -> Vec<Value>
where
    F: Fn(&Map<String, Value>) -> Option<Vec<Value>>,
{
    let mut found = Vec::new();
    walk(tree, predicate, 0, &mut found);
    found
}

fn walk<F>(tree: &Value, predicate: &F, depth: usize, found: &mut Vec<Value>)
where
    F: Fn(&Map<String, Value>) -> Option<Vec<Value>>,
{
    if depth > MAX_DEPTH {
        return;
    }
    match tree {
        Value::Object(map) => {
            if let Some(mut values) = predicate(map) {
                found.append(&mut values);
            } else {
                for value in map.values() {
                    walk(value, predicate, depth + 1, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, predicate, depth + 1, found);
            }
        }
        _ => {}
    }
}

/// Matches nodes whose `__typename` is [`CURSOR_TYPE`], extracting the
/// node's `value` field. Matching a cursor node ends the descent into it.
#[must_use]
pub fn pagination_cursors(node: &Map<String, Value>) -> Option<Vec<Value>> {
    match node.get("__typename") {
        Some(Value::String(tag)) if tag == CURSOR_TYPE => {
            Some(node.get("value").cloned().into_iter().collect())
        }
        _ => None,
    }
}

/// Matches nodes carrying a `name` field, extracting that name.
#[must_use]
pub fn named_fields(node: &Map<String, Value>) -> Option<Vec<Value>> {
    node.get("name").map(|name| vec![name.clone()])
}

/// Cursor token strings discovered anywhere in `tree`.
#[must_use]
pub fn cursor_tokens(tree: &Value) -> Vec<String> {
    collect(tree, &pagination_cursors)
        .into_iter()
        .filter_map(|value| value.as_str().map(str::to_owned))
        .collect()
}

/// `name` field strings discovered anywhere in `tree`.
#[must_use]
pub fn field_names(tree: &Value) -> Vec<String> {
    collect(tree, &named_fields)
        .into_iter()
        .filter_map(|value| value.as_str().map(str::to_owned))
        .collect()
}
