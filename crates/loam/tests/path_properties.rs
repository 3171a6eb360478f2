//! Property tests for the path tokenizer and resolver.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

use proptest::prelude::*;

use loam::{get, get_or, has, set, tokenize, unset, PathKey, Value};

/// One path segment: a lowercase key or a small list index.
#[derive(Clone, Debug)]
enum Segment {
    Name(String),
    Index(i64),
}

fn segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        prop::string::string_regex("[a-z][a-z0-9_]{0,7}")
            .expect("valid regex")
            .prop_map(Segment::Name),
        (0i64..4).prop_map(Segment::Index),
    ]
}

fn path_strategy() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec(segment_strategy(), 1..5)
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Bool),
        prop::string::string_regex("[ -~]{0,12}")
            .expect("valid regex")
            .prop_map(Value::string),
        Just(Value::Null),
    ]
}

/// Render segments in the path grammar: dots between names, brackets
/// around indices.
fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Name(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            Segment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
    out
}

fn expected_keys(segments: &[Segment]) -> Vec<PathKey> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Name(name) => PathKey::Name(name.clone()),
            Segment::Index(index) => PathKey::Index(*index),
        })
        .collect()
}

proptest! {
    #[test]
    fn tokenizing_rendered_paths_recovers_the_segments(segments in path_strategy()) {
        let raw = render(&segments);
        prop_assume!(!raw.is_empty());
        let path = tokenize(raw.as_str());
        let keys: Vec<PathKey> = path.keys().cloned().collect();
        prop_assert_eq!(keys, expected_keys(&segments));
    }

    #[test]
    fn tokenizing_is_a_pure_function(segments in path_strategy()) {
        let raw = render(&segments);
        prop_assert_eq!(tokenize(raw.as_str()), tokenize(raw.as_str()));
    }

    #[test]
    fn set_then_get_roundtrips(segments in path_strategy(), value in scalar_strategy()) {
        let raw = render(&segments);
        prop_assume!(!raw.is_empty());
        let mut doc = Value::empty_map();
        set(&mut doc, raw.as_str(), value.clone()).unwrap();
        prop_assert_eq!(get(&doc, raw.as_str()), value);
        prop_assert!(has(&doc, raw.as_str()));
    }

    #[test]
    fn unset_after_set_removes(segments in path_strategy(), value in scalar_strategy()) {
        let raw = render(&segments);
        prop_assume!(!raw.is_empty());
        let mut doc = Value::empty_map();
        set(&mut doc, raw.as_str(), value).unwrap();
        prop_assert!(unset(&mut doc, raw.as_str()));
        prop_assert!(!has(&doc, raw.as_str()));
    }

    #[test]
    fn misses_report_the_default(segments in path_strategy()) {
        let raw = render(&segments);
        prop_assume!(!raw.is_empty());
        let empty = Value::empty_map();
        prop_assert!(!has(&empty, raw.as_str()));
        prop_assert_eq!(get(&empty, raw.as_str()), Value::Null);
        prop_assert_eq!(
            get_or(&empty, raw.as_str(), Value::string("sentinel")),
            Value::string("sentinel")
        );
    }
}
