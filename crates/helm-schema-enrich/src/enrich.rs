use serde_json::Value;

use crate::index::{ValueCommentIndex, ValueRecord};
use crate::walk::{Visit, for_each_json_key};

/// Add documented descriptions and defaults to a schema in place.
///
/// Every object node whose key path is in `index` gets its `description` replaced,
/// even by an empty one. Its `default` is replaced only if the record has one.
/// Matches on non-object nodes are skipped.
pub fn enrich_schema(schema: &mut Value, index: &ValueCommentIndex) {
    let mut enriched = 0usize;
    for_each_json_key(schema, "", &mut |visit| match visit {
        Visit::Key { path, value } => {
            if let Some(record) = index.get(path)
                && apply_record(path, value, record)
            {
                enriched += 1;
            }
        }
        // array elements carry no key path of their own
        Visit::Index { .. } => {}
    });
    tracing::debug!(enriched, documented = index.len(), "enriched schema");
}

fn apply_record(path: &str, node: &mut Value, record: &ValueRecord) -> bool {
    let Value::Object(obj) = node else {
        tracing::trace!(path, "documented value matches a non-object schema node");
        return false;
    };

    obj.insert(
        "description".to_string(),
        Value::String(record.description.clone()),
    );
    if let Some(default) = &record.default {
        obj.insert("default".to_string(), default.clone());
    }

    tracing::trace!(path, has_default = record.default.is_some(), "enriched schema node");
    true
}
