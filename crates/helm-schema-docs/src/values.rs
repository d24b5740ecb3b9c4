use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Flatten a `values.yaml` document into `(key path, value)` rows.
///
/// Non-empty mappings are descended into. Everything else is a row of its own:
/// scalars, sequences and empty mappings. A non-empty mapping additionally gets
/// its own row when `is_documented` reports a comment for its key path.
pub fn flatten_values<'a>(
    doc: &'a YamlValue,
    is_documented: impl Fn(&str) -> bool,
) -> Vec<(String, &'a YamlValue)> {
    let mut out = Vec::new();
    if let YamlValue::Mapping(m) = doc {
        flatten_mapping(m, "", &is_documented, &mut out);
    }
    out
}

fn flatten_mapping<'a>(
    m: &'a serde_yaml::Mapping,
    prefix: &str,
    is_documented: &dyn Fn(&str) -> bool,
    out: &mut Vec<(String, &'a YamlValue)>,
) {
    for (k, v) in m {
        let Some(k) = key_to_string(k) else {
            tracing::trace!(?k, prefix, "skipping non-scalar values key");
            continue;
        };
        let key = if prefix.is_empty() {
            k
        } else {
            format!("{prefix}.{k}")
        };

        match v {
            YamlValue::Mapping(sub) if !sub.is_empty() => {
                if is_documented(&key) {
                    out.push((key.clone(), v));
                }
                flatten_mapping(sub, &key, is_documented, out);
            }
            _ => out.push((key, v)),
        }
    }
}

fn key_to_string(k: &YamlValue) -> Option<String> {
    match k {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Render a default the way helm-docs does: JSON wrapped in backticks, `nil` for null.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized to JSON.
pub fn format_default(value: &YamlValue) -> serde_json::Result<String> {
    if value.is_null() {
        return Ok("`nil`".to_string());
    }
    let json = serde_json::to_string(&yaml_to_json(value))?;
    Ok(format!("`{json}`"))
}

/// Convert a YAML value into its JSON counterpart.
///
/// Scalar mapping keys are stringified. Tags are dropped, and floats that JSON
/// cannot represent (`.nan`, `.inf`) become strings.
#[must_use]
pub fn yaml_to_json(value: &YamlValue) -> JsonValue {
    match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                JsonValue::from(i)
            } else if let Some(u) = n.as_u64() {
                JsonValue::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or_else(|| JsonValue::String(n.to_string()), JsonValue::Number)
            }
        }
        YamlValue::String(s) => JsonValue::String(s.clone()),
        YamlValue::Sequence(seq) => JsonValue::Array(seq.iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(m) => JsonValue::Object(
            m.iter()
                .filter_map(|(k, v)| Some((key_to_string(k)?, yaml_to_json(v))))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
