//! Element merge engine: replace and append semantics over document trees.
//!
//! Later fragments use these operations to override values defined by
//! earlier fragments. Both entry points take the container by value and
//! return the updated container; only the earliest matching element or key
//! is affected per call (first-match-wins).

use serde_yaml::{Mapping, Value};

use crate::error::{OverlayError, OverlayResult};
use crate::pattern::MatchPattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeMode {
    Replace,
    Append,
}

/// Replace the first element or key matching `pattern` with `new_value`.
///
/// Sequences are scanned in order; the first string element satisfying
/// `pattern` is replaced wholesale and scanning stops. Mappings treat the
/// raw pattern text as a literal key and overwrite only an existing entry.
/// Without a match the container is returned unchanged.
///
/// # Errors
///
/// Returns [`OverlayError::UnsupportedShape`] when `container` is neither a
/// sequence nor a mapping.
///
/// # Examples
///
/// ```rust
/// use overlay_config::{MatchPattern, replace_element};
/// use serde_yaml::Value;
///
/// let list: Value = serde_yaml::from_str("[pen, apple, peach]")?;
/// let merged = replace_element(list, &MatchPattern::parse("pen"), "pencil".into())?;
/// let expected: Value = serde_yaml::from_str("[pencil, apple, peach]")?;
/// assert_eq!(merged, expected);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn replace_element(
    container: Value,
    pattern: &MatchPattern,
    new_value: Value,
) -> OverlayResult<Value> {
    merge_element(container, pattern, new_value, MergeMode::Replace)
}

/// Replace the first match of `pattern`, or append `new_value` when nothing
/// matches.
///
/// The append is suppressed when an existing element is already deep-equal
/// to `new_value`, so repeating the call does not accumulate duplicates.
/// Mappings insert the raw pattern text as a new key when absent and
/// otherwise behave like [`replace_element`].
///
/// # Errors
///
/// Returns [`OverlayError::UnsupportedShape`] when `container` is neither a
/// sequence nor a mapping.
pub fn append_element(
    container: Value,
    pattern: &MatchPattern,
    new_value: Value,
) -> OverlayResult<Value> {
    merge_element(container, pattern, new_value, MergeMode::Append)
}

fn merge_element(
    container: Value,
    pattern: &MatchPattern,
    new_value: Value,
    mode: MergeMode,
) -> OverlayResult<Value> {
    match container {
        Value::Sequence(elements) => Ok(Value::Sequence(merge_sequence(
            elements, pattern, new_value, mode,
        ))),
        Value::Mapping(entries) => Ok(Value::Mapping(merge_mapping(
            entries, pattern, new_value, mode,
        ))),
        other => Err(OverlayError::UnsupportedShape {
            found: shape_name(&other),
        }),
    }
}

fn merge_sequence(
    mut elements: Vec<Value>,
    pattern: &MatchPattern,
    new_value: Value,
    mode: MergeMode,
) -> Vec<Value> {
    let matched = elements
        .iter()
        .position(|element| element.as_str().is_some_and(|s| pattern.matches_element(s)));
    match matched {
        Some(index) => {
            if let Some(slot) = elements.get_mut(index) {
                *slot = new_value;
            }
        }
        None => {
            if mode == MergeMode::Append && !elements.contains(&new_value) {
                elements.push(new_value);
            }
        }
    }
    elements
}

fn merge_mapping(
    mut entries: Mapping,
    pattern: &MatchPattern,
    new_value: Value,
    mode: MergeMode,
) -> Mapping {
    let key = Value::String(pattern.raw().to_owned());
    if mode == MergeMode::Append || entries.contains_key(&key) {
        entries.insert(key, new_value);
    }
    entries
}

const fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Tagged(_) => "tagged",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
    }
}

/// Fold `key=value` string elements into a mapping.
///
/// Elements without a separator, and elements with nothing after it, map to
/// the empty string. Non-string elements are skipped. A later occurrence of
/// a key overwrites an earlier one.
///
/// # Examples
///
/// ```rust
/// use overlay_config::sequence_to_map;
/// use serde_yaml::Value;
///
/// let elements = vec![Value::from("a=b"), Value::from("c")];
/// let map = sequence_to_map(&elements);
/// assert_eq!(map[&Value::from("a")], Value::from("b"));
/// assert_eq!(map[&Value::from("c")], Value::from(""));
/// ```
#[must_use]
pub fn sequence_to_map(elements: &[Value]) -> Mapping {
    let mut entries = Mapping::new();
    for element in elements {
        let Some(text) = element.as_str() else {
            continue;
        };
        let (key, value) = text.split_once('=').unwrap_or((text, ""));
        entries.insert(Value::from(key), Value::from(value));
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fruits() -> Value {
        Value::Sequence(vec![
            Value::from("pen"),
            Value::from("apple"),
            Value::from("peach"),
        ])
    }

    fn pairs() -> Value {
        let mut entries = Mapping::new();
        entries.insert(Value::from("key1"), Value::from("val1"));
        entries.insert(Value::from("key2"), Value::from("val2"));
        Value::Mapping(entries)
    }

    #[test]
    fn replace_swaps_first_literal_match() {
        let merged = replace_element(fruits(), &MatchPattern::parse("pen"), Value::from("pencil"))
            .expect("sequence merge");
        let elements = merged.as_sequence().expect("sequence");
        assert_eq!(elements.len(), 3);
        assert_eq!(elements.first(), Some(&Value::from("pencil")));
    }

    #[test]
    fn replace_without_match_leaves_sequence_unchanged() {
        let merged = replace_element(
            fruits(),
            &MatchPattern::parse("not_exist"),
            Value::from("not_exist"),
        )
        .expect("sequence merge");
        assert_eq!(merged, fruits());
    }

    #[test]
    fn replace_affects_only_the_earliest_match() {
        let list = Value::Sequence(vec![
            Value::from("mode=a"),
            Value::from("mode=b"),
        ]);
        let merged = replace_element(list, &MatchPattern::parse("mode"), Value::from("mode=c"))
            .expect("sequence merge");
        let expected = Value::Sequence(vec![Value::from("mode=c"), Value::from("mode=b")]);
        assert_eq!(merged, expected);
    }

    #[rstest]
    #[case::prefix_replaces_whole_element("fruit=banana", "^fruit=", "fruit=apple", true)]
    #[case::exact_ignores_other_separator("fruit.banana", "^fruit$", "fruit=apple", false)]
    #[case::exact_ignores_joined_text("fruitbanana", "^fruit$", "fruit=apple", false)]
    fn replace_anchor_semantics(
        #[case] element: &str,
        #[case] pattern: &str,
        #[case] replacement: &str,
        #[case] replaced: bool,
    ) {
        let list = Value::Sequence(vec![
            Value::from(element),
            Value::from("apple"),
            Value::from("peach"),
        ]);
        let merged = replace_element(
            list,
            &MatchPattern::parse(pattern),
            Value::from(replacement),
        )
        .expect("sequence merge");
        let elements = merged.as_sequence().expect("sequence");
        let expected = if replaced { replacement } else { element };
        assert_eq!(elements.first(), Some(&Value::from(expected)));
    }

    #[test]
    fn append_adds_once_and_suppresses_duplicates() {
        let pattern = MatchPattern::parse("monkey");
        let appended = append_element(fruits(), &pattern, Value::from("monkey"))
            .expect("sequence merge");
        let again = append_element(appended.clone(), &pattern, Value::from("monkey"))
            .expect("sequence merge");
        let elements = again.as_sequence().expect("sequence");
        assert_eq!(elements.len(), 4);
        assert_eq!(elements.last(), Some(&Value::from("monkey")));
        assert_eq!(appended, again);
    }

    #[test]
    fn append_replaces_when_prefix_matches() {
        let list = Value::Sequence(vec![
            Value::from("fruit=banana"),
            Value::from("apple"),
        ]);
        let merged = append_element(
            list,
            &MatchPattern::parse("^fruit="),
            Value::from("fruit=apple"),
        )
        .expect("sequence merge");
        let elements = merged.as_sequence().expect("sequence");
        assert_eq!(elements.len(), 2);
        assert_eq!(elements.first(), Some(&Value::from("fruit=apple")));
    }

    #[test]
    fn append_falls_through_when_exact_anchor_misses() {
        let list = Value::Sequence(vec![
            Value::from("fruit.banana"),
            Value::from("apple"),
        ]);
        let merged = append_element(
            list,
            &MatchPattern::parse("^fruit$"),
            Value::from("fruit=apple1"),
        )
        .expect("sequence merge");
        let elements = merged.as_sequence().expect("sequence");
        assert_eq!(elements.last(), Some(&Value::from("fruit=apple1")));
        assert_eq!(elements.first(), Some(&Value::from("fruit.banana")));
    }

    #[test]
    fn replace_overwrites_existing_mapping_key_only() {
        let merged = replace_element(pairs(), &MatchPattern::parse("key2"), Value::from("val3"))
            .expect("mapping merge");
        let entries = merged.as_mapping().expect("mapping");
        assert_eq!(entries[&Value::from("key2")], Value::from("val3"));

        let untouched = replace_element(pairs(), &MatchPattern::parse("key3"), Value::from("val3"))
            .expect("mapping merge");
        assert!(!untouched
            .as_mapping()
            .expect("mapping")
            .contains_key(&Value::from("key3")));
    }

    #[test]
    fn append_inserts_missing_mapping_key() {
        let merged = append_element(pairs(), &MatchPattern::parse("key3"), Value::from("val3"))
            .expect("mapping merge");
        let entries = merged.as_mapping().expect("mapping");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[&Value::from("key3")], Value::from("val3"));
    }

    #[rstest]
    #[case::scalar(Value::from("text"), "string")]
    #[case::null(Value::Null, "null")]
    #[case::number(Value::from(7), "number")]
    fn merge_rejects_non_container_shapes(#[case] container: Value, #[case] found: &str) {
        let err = replace_element(container, &MatchPattern::parse("k"), Value::from("v"))
            .expect_err("shape error");
        match err {
            OverlayError::UnsupportedShape { found: name } => assert_eq!(name, found),
            other => panic!("expected UnsupportedShape, got {other}"),
        }
    }

    #[test]
    fn sequence_to_map_handles_bare_and_empty_values() {
        let elements = vec![Value::from("a=b"), Value::from("c"), Value::from("d=")];
        let map = sequence_to_map(&elements);
        assert_eq!(map.len(), 3);
        assert_eq!(map[&Value::from("a")], Value::from("b"));
        assert_eq!(map[&Value::from("c")], Value::from(""));
        assert_eq!(map[&Value::from("d")], Value::from(""));
        assert!(sequence_to_map(&[]).is_empty());
    }
}
