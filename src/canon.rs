// src/canon.rs

//! Deep canonicalization of attribute trees
//!
//! Nexus returns blobstore attributes with whatever key order its
//! serializer picked, which differs from manifest order. Canonicalization
//! re-inserts mapping keys in lexical order at every nesting level so two
//! semantically equal trees compare equal structurally. Array element
//! order is significant and is preserved.

use serde_json::{Map, Value};

/// Recursively sort object keys; arrays keep their element order
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let sorted: Map<String, Value> = keys
                .into_iter()
                .map(|k| (k.clone(), canonicalize(&map[k])))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Remove the value at a nested key path, if present
///
/// Walks to the parent of the final key and removes the final key from it.
/// Missing intermediate nodes or non-object nodes along the way make this
/// a no-op; it never errors.
pub fn delete_at_path(value: &mut Value, path: &[&str]) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut node = value;
    for key in parents {
        match node.get_mut(*key) {
            Some(next) => node = next,
            None => return,
        }
    }

    if let Value::Object(map) = node {
        map.remove(*last);
    }
}
