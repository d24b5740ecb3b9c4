//! Path-aware traversal of JSON schema documents.

use serde_json::Value;

/// Schema keyword whose segment is elided from key paths.
pub const PROPERTIES: &str = "properties";

/// A slot visited by [`for_each_json_key`].
#[derive(Debug)]
pub enum Visit<'a> {
    /// Value stored under an object key, with the key path computed for it.
    Key { path: &'a str, value: &'a mut Value },
    /// Element of an array.
    Index { index: usize, value: &'a mut Value },
}

/// Join a parent key path and an object key.
///
/// `properties` segments are elided so that `a.properties.b` in a schema lines up with
/// the value key path `a.b`.
#[must_use]
pub fn join_key_path(parent: &str, key: &str) -> String {
    let parent = if parent == PROPERTIES { "" } else { parent };
    let key = if key == PROPERTIES { "" } else { key };

    match (parent.is_empty(), key.is_empty()) {
        (true, _) => key.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{parent}.{key}"),
    }
}

/// Depth-first walk over every object key and array element below `value`.
///
/// The handler sees each slot before the walk descends into it, so changes it makes
/// are visible to the rest of the walk. Array elements inherit the key path of the
/// array itself.
pub fn for_each_json_key<F>(value: &mut Value, path: &str, handler: &mut F)
where
    F: FnMut(Visit<'_>),
{
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let child_path = join_key_path(path, key);
                handler(Visit::Key {
                    path: &child_path,
                    value: &mut *child,
                });
                for_each_json_key(child, &child_path, handler);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter_mut().enumerate() {
                handler(Visit::Index {
                    index,
                    value: &mut *child,
                });
                for_each_json_key(child, path, handler);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
