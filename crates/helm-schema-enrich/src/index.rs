use std::collections::HashMap;

use helm_schema_docs::DocumentedValue;
use serde_json::Value;

use crate::{Error, Result};

/// What is known about a documented value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRecord {
    /// Decoded default. `None` when no default was documented, which is
    /// different from `Some(Value::Null)` for an explicit `nil`.
    pub default: Option<Value>,
    pub description: String,
}

/// Documented values by dotted key path.
#[derive(Debug, Clone, Default)]
pub struct ValueCommentIndex {
    records: HashMap<String, ValueRecord>,
}

impl ValueCommentIndex {
    /// Build the index from documented values.
    ///
    /// A key path that occurs more than once keeps the record of its last occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DefaultDecode`] for the first default that is neither empty
    /// nor valid JSON after normalization.
    pub fn from_documented_values<'a>(
        values: impl IntoIterator<Item = &'a DocumentedValue>,
    ) -> Result<Self> {
        let mut records = HashMap::new();
        for value in values {
            let default =
                decode_default(&value.default_text).map_err(|source| Error::DefaultDecode {
                    key: value.key.clone(),
                    text: value.default_text.clone(),
                    source,
                })?;
            let record = ValueRecord {
                default,
                description: value.auto_description.clone(),
            };
            if records.insert(value.key.clone(), record).is_some() {
                tracing::debug!(key = %value.key, "documented value overrides an earlier entry");
            }
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ValueRecord> {
        self.records.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Strip helm-docs quoting from a default.
///
/// Removes one trailing and one leading backtick, maps `nil` to `null`, and returns
/// `None` if nothing is left.
#[must_use]
pub fn normalize_default_text(text: &str) -> Option<&str> {
    let text = text.strip_suffix('`').unwrap_or(text);
    let text = text.strip_prefix('`').unwrap_or(text);
    match text {
        "" => None,
        "nil" => Some("null"),
        other => Some(other),
    }
}

/// Decode a documented default into a JSON value.
///
/// # Errors
///
/// Returns an error if the normalized text is not valid JSON.
pub fn decode_default(text: &str) -> serde_json::Result<Option<Value>> {
    normalize_default_text(text)
        .map(serde_json::from_str)
        .transpose()
}
