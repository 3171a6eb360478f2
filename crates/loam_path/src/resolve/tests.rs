#![allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]

use pretty_assertions::assert_eq;

use loam_value::Value;

use crate::{find, get, get_or, has, set, set_with, tokenize, unset, update, PathError};

fn sample() -> Value {
    // {a: {b: [{c: 1}, {c: 2}]}, empty: null}
    Value::map_from([
        (
            "a",
            Value::map_from([(
                "b",
                Value::list(vec![
                    Value::map_from([("c", 1i64)]),
                    Value::map_from([("c", 2i64)]),
                ]),
            )]),
        ),
        ("empty", Value::Null),
    ])
}

#[test]
fn get_walks_maps_and_lists() {
    let doc = sample();
    assert_eq!(get(&doc, "a.b[0].c"), Value::Int(1));
    assert_eq!(get(&doc, "a.b[1].c"), Value::Int(2));
    assert_eq!(get(&doc, "a.b[-1].c"), Value::Int(2));
}

#[test]
fn get_miss_returns_default() {
    let doc = sample();
    assert_eq!(get(&doc, "a.x.y"), Value::Null);
    assert_eq!(get_or(&doc, "a.x.y", 9i64), Value::Int(9));
    assert_eq!(get_or(&doc, "a.b[5]", "none"), Value::string("none"));
    assert_eq!(get_or(&doc, "a.b[-3]", "none"), Value::string("none"));
}

#[test]
fn mismatched_shapes_are_misses() {
    let doc = sample();
    // Map key against a list, list index against a map.
    assert_eq!(get(&doc, "a.b.c"), Value::Null);
    assert_eq!(get(&doc, "a[0]"), Value::Null);
    // Reading through a scalar.
    assert_eq!(get(&doc, "a.b[0].c.d"), Value::Null);
}

#[test]
fn empty_path_resolves_to_the_structure() {
    let doc = sample();
    assert_eq!(find(&doc, crate::PathSpec::Unset), Some(&doc));
}

#[test]
fn has_distinguishes_absent_from_null() {
    let doc = sample();
    assert!(has(&doc, "a.b[0].c"));
    assert!(has(&doc, "empty"));
    assert!(!has(&doc, "missing"));
    assert!(!has(&doc, "a.b[9]"));
}

#[test]
fn set_roundtrips_through_get() {
    let mut doc = Value::empty_map();
    set(&mut doc, "a.b.c", 7i64).unwrap();
    assert_eq!(get(&doc, "a.b.c"), Value::Int(7));
}

#[test]
fn set_creates_lists_from_bracket_tokens() {
    let mut doc = Value::empty_map();
    set(&mut doc, "a[1].b", true).unwrap();
    // a is a list padded with null up to index 1.
    assert_eq!(get(&doc, "a[0]"), Value::Null);
    assert!(has(&doc, "a[0]"));
    assert_eq!(get(&doc, "a[1].b"), Value::Bool(true));
}

#[test]
fn set_overwrites_wrong_shapes() {
    let mut doc = Value::map_from([("a", 1i64)]);
    set(&mut doc, "a.b", 2i64).unwrap();
    assert_eq!(get(&doc, "a.b"), Value::Int(2));

    // A map in list position is replaced wholesale.
    let mut doc = Value::map_from([("a", Value::empty_map())]);
    set(&mut doc, "a[0]", "x").unwrap();
    assert_eq!(get(&doc, "a[0]"), Value::string("x"));
}

#[test]
fn set_coerces_a_scalar_root() {
    let mut doc = Value::Int(0);
    set(&mut doc, "a.b", 1i64).unwrap();
    assert_eq!(get(&doc, "a.b"), Value::Int(1));
}

#[test]
fn set_final_write_is_unconditional() {
    let mut doc = sample();
    set(&mut doc, "a.b", "flattened").unwrap();
    assert_eq!(get(&doc, "a.b"), Value::string("flattened"));
}

#[test]
fn set_negative_index_writes_in_place() {
    let mut doc = Value::map_from([("a", Value::list_from([1i64, 2, 3]))]);
    set(&mut doc, "a[-1]", 9i64).unwrap();
    assert_eq!(get(&doc, "a"), Value::list_from([1i64, 2, 9]));
}

#[test]
fn set_negative_index_out_of_range_fails() {
    let mut doc = Value::map_from([("a", Value::list_from([1i64]))]);
    let err = set(&mut doc, "a[-5]", 0i64).unwrap_err();
    assert_eq!(err, PathError::IndexOutOfBounds { index: -5, len: 1 });
}

#[test]
fn set_empty_path_writes_nothing() {
    let mut doc = sample();
    let before = doc.clone();
    set(&mut doc, crate::PathSpec::Unset, 1i64).unwrap();
    assert_eq!(doc, before);
}

#[test]
fn set_with_customizer_supplies_intermediates() {
    let mut doc = Value::empty_map();
    let seen = std::cell::Cell::new(0usize);
    set_with(
        &mut doc,
        "a.b",
        1i64,
        &|existing| {
            seen.set(seen.get() + 1);
            assert!(existing.is_none());
            Some(Value::map_from([("marker", true)]))
        },
    )
    .unwrap();
    assert_eq!(seen.get(), 1);
    assert_eq!(get(&doc, "a.marker"), Value::Bool(true));
    assert_eq!(get(&doc, "a.b"), Value::Int(1));
}

#[test]
fn set_with_customizer_wrong_shape_falls_back() {
    let mut doc = Value::empty_map();
    set_with(&mut doc, "a.b", 1i64, &|_| Some(Value::Int(5))).unwrap();
    // The supplied scalar cannot hold key "b"; a fresh map is used instead.
    assert_eq!(get(&doc, "a.b"), Value::Int(1));
}

#[test]
fn unset_removes_and_reports() {
    let mut doc = sample();
    assert!(unset(&mut doc, "a.b[0].c"));
    assert!(!has(&doc, "a.b[0].c"));
    // The parent map is still there, just empty.
    assert!(has(&doc, "a.b[0]"));

    assert!(!unset(&mut doc, "a.b[0].c"));
    assert!(!unset(&mut doc, "nothing.here"));
}

#[test]
fn unset_list_entry_shifts() {
    let mut doc = Value::map_from([("a", Value::list_from([1i64, 2, 3]))]);
    assert!(unset(&mut doc, "a[0]"));
    assert_eq!(get(&doc, "a"), Value::list_from([2i64, 3]));
    assert!(!unset(&mut doc, "a[7]"));
}

#[test]
fn unset_does_not_vivify() {
    let mut doc = Value::empty_map();
    assert!(!unset(&mut doc, "a.b.c"));
    assert_eq!(doc, Value::empty_map());
}

#[test]
fn update_applies_to_current_value() {
    let mut doc = Value::map_from([("n", 10i64)]);
    update(&mut doc, "n", |v| {
        Value::Int(v.as_int().unwrap_or(0) + 1)
    })
    .unwrap();
    assert_eq!(get(&doc, "n"), Value::Int(11));
}

#[test]
fn update_missing_path_sees_null() {
    let mut doc = Value::empty_map();
    update(&mut doc, "a.b", |v| {
        assert!(v.is_null());
        Value::string("made")
    })
    .unwrap();
    assert_eq!(get(&doc, "a.b"), Value::string("made"));
}

#[test]
fn copy_on_write_leaves_clones_untouched() {
    let original = sample();
    let mut edited = original.clone();
    set(&mut edited, "a.b[0].c", 99i64).unwrap();
    assert_eq!(get(&original, "a.b[0].c"), Value::Int(1));
    assert_eq!(get(&edited, "a.b[0].c"), Value::Int(99));
}

#[test]
fn bare_numeric_key_addresses_lists() {
    let doc = Value::list_from([10i64, 20, 30]);
    assert_eq!(get(&doc, 1i64), Value::Int(20));
    assert_eq!(get(&doc, -1i64), Value::Int(30));

    let mut doc = Value::Null;
    set(&mut doc, 2i64, "x").unwrap();
    assert_eq!(
        doc,
        Value::list(vec![Value::Null, Value::Null, Value::string("x")])
    );
}

#[test]
fn presplit_paths_resolve_like_strings() {
    let doc = sample();
    let path = tokenize(vec![
        crate::PathKey::Name("a".into()),
        crate::PathKey::Name("b".into()),
        crate::PathKey::Index(0),
        crate::PathKey::Name("c".into()),
    ]);
    assert_eq!(get(&doc, path), Value::Int(1));
}
