use std::collections::BTreeMap;

/// Documentation attached to a single `values.yaml` key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueComment {
    pub description: String,
    /// Verbatim text of an `# @default --` annotation.
    pub default: Option<String>,
}

/// Collect helm-docs comments from the source text of a `values.yaml` file.
///
/// Two comment styles are recognized:
///
/// ```yaml
/// # -- description of the key below,
/// # continued on the next line
/// # @default -- `"computed"`
/// key: value
///
/// # nested.key -- description of a key anywhere in the file
/// ```
///
/// A `# --` block applies to the mapping key directly below it. Blank lines and
/// sequence items discard a pending block. When both styles document the same
/// key, the block directly above the key wins.
#[must_use]
pub fn parse_value_comments(values_yaml: &str) -> BTreeMap<String, ValueComment> {
    let mut adjacent: BTreeMap<String, ValueComment> = BTreeMap::new();
    let mut legacy: BTreeMap<String, ValueComment> = BTreeMap::new();

    let mut stack: Vec<(usize, String)> = Vec::new();
    let mut pending: Option<ValueComment> = None;
    let mut block_scalar_indent: Option<usize> = None;

    for line in values_yaml.lines() {
        let content = line.trim_start();
        let indent = line.len() - content.len();

        if let Some(block_indent) = block_scalar_indent {
            if content.is_empty() || indent > block_indent {
                continue;
            }
            block_scalar_indent = None;
        }

        if content.is_empty() {
            pending = None;
            continue;
        }

        if let Some(comment) = content.strip_prefix('#') {
            let body = comment.strip_prefix(' ').unwrap_or(comment).trim_end();
            scan_comment(body, &mut pending, &mut legacy);
            continue;
        }

        if content.starts_with("---") || content.starts_with("...") {
            stack.clear();
            pending = None;
            continue;
        }

        if content == "-" || content.starts_with("- ") {
            pending = None;
            continue;
        }

        let Some((key, rest)) = split_mapping_key(content) else {
            pending = None;
            continue;
        };

        while stack.last().is_some_and(|(i, _)| *i >= indent) {
            stack.pop();
        }

        let path = stack
            .iter()
            .map(|(_, k)| k.as_str())
            .chain(std::iter::once(key.as_str()))
            .collect::<Vec<_>>()
            .join(".");

        if let Some(comment) = pending.take() {
            adjacent.insert(path, comment);
        }

        if is_block_scalar(rest) {
            block_scalar_indent = Some(indent);
        }
        stack.push((indent, key));
    }

    legacy.extend(adjacent);
    legacy
}

fn scan_comment(
    body: &str,
    pending: &mut Option<ValueComment>,
    legacy: &mut BTreeMap<String, ValueComment>,
) {
    if let Some(text) = body.strip_prefix("--")
        && (text.is_empty() || text.starts_with(' '))
    {
        *pending = Some(ValueComment {
            description: text.trim().to_string(),
            default: None,
        });
        return;
    }

    if let Some(annotation) = body.strip_prefix('@') {
        if let Some(comment) = pending.as_mut()
            && let Some(text) = annotation_text(annotation, "default")
        {
            comment.default = Some(text.to_string());
        }
        return;
    }

    // legacy lines are collected file-wide, independent of any open block
    if let Some((key, text)) = legacy_key_comment(body) {
        legacy.insert(
            key.to_string(),
            ValueComment {
                description: text.to_string(),
                default: None,
            },
        );
    }

    if let Some(comment) = pending.as_mut() {
        let text = body.trim();
        if text.is_empty() {
            return;
        }
        if !comment.description.is_empty() {
            comment.description.push(' ');
        }
        comment.description.push_str(text);
    }
}

fn annotation_text<'a>(annotation: &'a str, name: &str) -> Option<&'a str> {
    let text = annotation.strip_prefix(name)?.trim_start().strip_prefix("--")?;
    Some(text.trim())
}

fn legacy_key_comment(body: &str) -> Option<(&str, &str)> {
    let (key, text) = body.split_once(" -- ")?;
    let key = key.trim();
    let is_key = !key.is_empty()
        && !key.starts_with(['-', '.'])
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '[' | ']' | '/'));
    is_key.then(|| (key, text.trim()))
}

fn split_mapping_key(content: &str) -> Option<(String, &str)> {
    if let Some(quote) = content.chars().next().filter(|&c| matches!(c, '"' | '\'')) {
        let inner = &content[1..];
        let end = inner.find(quote)?;
        let rest = inner[end + 1..].trim_start().strip_prefix(':')?;
        if !(rest.is_empty() || rest.starts_with([' ', '\t'])) {
            return None;
        }
        return Some((inner[..end].to_string(), rest));
    }

    if content.starts_with(['{', '[', '?', '|', '>']) {
        return None;
    }

    let (idx, _) = content.match_indices(':').find(|(i, _)| {
        let after = &content[i + 1..];
        after.is_empty() || after.starts_with([' ', '\t'])
    })?;

    let key = content[..idx].trim_end();
    if key.is_empty() || key.contains(" #") {
        return None;
    }
    Some((key.to_string(), &content[idx + 1..]))
}

fn is_block_scalar(rest: &str) -> bool {
    let value = rest.split(" #").next().unwrap_or_default().trim();
    value.starts_with(['|', '>'])
}

#[cfg(test)]
mod tests {
    use super::{ValueComment, parse_value_comments};
    use indoc::indoc;
    use similar_asserts::assert_eq as sim_assert_eq;
    use std::collections::BTreeMap;

    fn described(entries: &[(&str, &str)]) -> BTreeMap<String, ValueComment> {
        entries
            .iter()
            .map(|(k, d)| {
                (
                    (*k).to_string(),
                    ValueComment {
                        description: (*d).to_string(),
                        default: None,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn block_comment_documents_nested_key() {
        let comments = parse_value_comments(indoc! {r#"
            image:
              # -- container image repository
              repository: nginx
              # -- overrides the image tag
              # whose default is the chart appVersion
              tag: ""
            # this is not a description
            pullPolicy: IfNotPresent
        "#});

        sim_assert_eq!(
            comments,
            described(&[
                ("image.repository", "container image repository"),
                (
                    "image.tag",
                    "overrides the image tag whose default is the chart appVersion"
                ),
            ])
        );
    }

    #[test]
    fn default_annotation_is_kept_verbatim() {
        let comments = parse_value_comments(indoc! {r#"
            # -- name of the service account
            # @default -- `"generated"`
            # @section -- Security
            name: ""
        "#});

        sim_assert_eq!(
            comments.get("name"),
            Some(&ValueComment {
                description: "name of the service account".to_string(),
                default: Some("`\"generated\"`".to_string()),
            })
        );
    }

    #[test]
    fn blank_line_detaches_block() {
        let comments = parse_value_comments(indoc! {r"
            # -- orphaned

            replicas: 1
        "});
        sim_assert_eq!(comments, BTreeMap::new());
    }

    #[test]
    fn legacy_key_comments_apply_anywhere() {
        let comments = parse_value_comments(indoc! {r"
            # service.port -- port of the service
            # service.type -- type of the service
            service:
              # -- adjacent wins
              type: ClusterIP
              port: 80
        "});

        sim_assert_eq!(
            comments,
            described(&[
                ("service.port", "port of the service"),
                ("service.type", "adjacent wins"),
            ])
        );
    }

    #[test]
    fn continuation_line_with_separator_stays_in_block() {
        let comments = parse_value_comments(indoc! {r"
            # -- number of replicas
            # note -- must be odd
            replicas: 1
        "});

        sim_assert_eq!(
            comments.get("replicas").map(|c| c.description.as_str()),
            Some("number of replicas note -- must be odd")
        );
    }

    #[test]
    fn sequences_and_block_scalars_do_not_confuse_paths() {
        let comments = parse_value_comments(indoc! {r#"
            config: |
              # -- not a description
              key: value
            env:
              - name: FOO
                value: bar
            # -- after the list
            "quoted.key": 1
            nested:
              deeper:
                # -- deep value
                leaf: true
              # -- shallow value
              sibling: false
        "#});

        sim_assert_eq!(
            comments,
            described(&[
                ("nested.deeper.leaf", "deep value"),
                ("nested.sibling", "shallow value"),
                ("quoted.key", "after the list"),
            ])
        );
    }
}
