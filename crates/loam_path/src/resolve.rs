//! Walking nested structures along a path: read, test, write, remove.
//!
//! Reads never fail: a step that cannot continue (missing key, index out of
//! range, wrong container shape) is a miss reported through the return
//! value. Writes auto-vivify: missing intermediates are created with the
//! container kind the next token expects, and a present intermediate of the
//! wrong shape is destructively replaced. The one write failure is a
//! negative list index that resolves before the start of the list.

use std::collections::HashMap;

use loam_value::Value;

use crate::errors::PathError;
use crate::token::{tokenize, ContainerKind, Path, PathKey, PathSpec};

/// Customizer consulted at each intermediate step of a write.
///
/// Receives the existing value at the step (`None` when the slot is missing
/// or null) and may return a replacement to use instead of the default
/// fresh container. A returned value of the wrong shape for the step is
/// ignored in favor of the default.
pub type Customizer<'a> = &'a dyn Fn(Option<&Value>) -> Option<Value>;

/// Resolve a path to a borrowed value, or `None` on any miss.
///
/// The empty path resolves to the structure itself.
pub fn find<'a>(structure: &'a Value, path: impl Into<PathSpec>) -> Option<&'a Value> {
    locate(structure, &tokenize(path))
}

/// Get a clone of the value at `path`, or `Null` on a miss.
pub fn get(structure: &Value, path: impl Into<PathSpec>) -> Value {
    get_or(structure, path, Value::Null)
}

/// Get a clone of the value at `path`, or `default` on a miss.
pub fn get_or(structure: &Value, path: impl Into<PathSpec>, default: impl Into<Value>) -> Value {
    locate(structure, &tokenize(path)).map_or_else(|| default.into(), Value::clone)
}

/// Whether the full path resolves to a present value.
///
/// A stored `Null` is present; only structural absence reports `false`.
pub fn has(structure: &Value, path: impl Into<PathSpec>) -> bool {
    locate(structure, &tokenize(path)).is_some()
}

/// Set the value at `path`, creating missing intermediate containers.
pub fn set(
    structure: &mut Value,
    path: impl Into<PathSpec>,
    value: impl Into<Value>,
) -> Result<(), PathError> {
    set_tokens(structure, &tokenize(path), value.into(), None)
}

/// Like [`set`], with a customizer intercepting intermediate containers.
pub fn set_with(
    structure: &mut Value,
    path: impl Into<PathSpec>,
    value: impl Into<Value>,
    customizer: Customizer<'_>,
) -> Result<(), PathError> {
    set_tokens(structure, &tokenize(path), value.into(), Some(customizer))
}

/// Apply `updater` to the value at `path` (null when absent) and write the
/// result back through the same auto-vivifying walk.
pub fn update(
    structure: &mut Value,
    path: impl Into<PathSpec>,
    updater: impl FnOnce(Value) -> Value,
) -> Result<(), PathError> {
    update_tokens(structure, &tokenize(path), updater, None)
}

/// Like [`update`], with a customizer intercepting intermediate containers.
pub fn update_with(
    structure: &mut Value,
    path: impl Into<PathSpec>,
    updater: impl FnOnce(Value) -> Value,
    customizer: Customizer<'_>,
) -> Result<(), PathError> {
    update_tokens(structure, &tokenize(path), updater, Some(customizer))
}

/// Remove the value at `path`.
///
/// Returns `false` without mutating anything when an intermediate step
/// misses or the final key is absent; returns `true` after removing the
/// entry. The parent container stays in place even when emptied.
pub fn unset(structure: &mut Value, path: impl Into<PathSpec>) -> bool {
    let path = tokenize(path);
    let Some((last, parents)) = path.tokens().split_last() else {
        return false;
    };
    let mut current = structure;
    for token in parents {
        match step_mut(current, &token.key) {
            Some(next) => current = next,
            None => return false,
        }
    }
    remove_entry(current, &last.key)
}

// Read walk

fn locate<'a>(structure: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = structure;
    for token in path.tokens() {
        current = step(current, &token.key)?;
    }
    Some(current)
}

fn step<'a>(value: &'a Value, key: &PathKey) -> Option<&'a Value> {
    match (key, value) {
        (PathKey::Name(name), Value::Map(entries)) => entries.get(name),
        (PathKey::Index(index), Value::List(items)) => {
            items.get(seq_index(items.len(), *index)?)
        }
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, key: &PathKey) -> Option<&'a mut Value> {
    match (key, value) {
        (PathKey::Name(name), Value::Map(entries)) => entries.make_mut().get_mut(name),
        (PathKey::Index(index), Value::List(items)) => {
            let ix = seq_index(items.len(), *index)?;
            items.make_mut().get_mut(ix)
        }
        _ => None,
    }
}

/// Resolve a possibly-negative index against a sequence length.
fn seq_index(len: usize, index: i64) -> Option<usize> {
    if index >= 0 {
        let ix = usize::try_from(index).ok()?;
        (ix < len).then_some(ix)
    } else {
        let back = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(back)
    }
}

// Write walk

fn set_tokens(
    structure: &mut Value,
    path: &Path,
    value: Value,
    customizer: Option<Customizer<'_>>,
) -> Result<(), PathError> {
    let tokens = path.tokens();
    let Some((last, parents)) = tokens.split_last() else {
        return Ok(());
    };
    let mut current = structure;
    for (i, token) in parents.iter().enumerate() {
        let child_kind = tokens[i + 1].kind;
        current = step_into(current, &token.key, child_kind, customizer)?;
    }
    write_entry(current, &last.key, value, customizer)
}

fn update_tokens(
    structure: &mut Value,
    path: &Path,
    updater: impl FnOnce(Value) -> Value,
    customizer: Option<Customizer<'_>>,
) -> Result<(), PathError> {
    let current = locate(structure, path).cloned().unwrap_or(Value::Null);
    set_tokens(structure, path, updater(current), customizer)
}

/// Descend into the child slot for `key`, vivifying it as a container of
/// `child_kind` when missing or null.
fn step_into<'a>(
    current: &'a mut Value,
    key: &PathKey,
    child_kind: ContainerKind,
    customizer: Option<Customizer<'_>>,
) -> Result<&'a mut Value, PathError> {
    match key {
        PathKey::Name(name) => {
            let entries = ensure_map(current, customizer);
            let slot = entries.entry(name.clone()).or_insert(Value::Null);
            vivify(slot, child_kind, customizer);
            Ok(slot)
        }
        PathKey::Index(index) => {
            let items = ensure_list(current, customizer);
            let ix = ensure_list_slot(items, *index)?;
            let slot = &mut items[ix];
            vivify(slot, child_kind, customizer);
            Ok(slot)
        }
    }
}

/// Unconditional final write.
fn write_entry(
    current: &mut Value,
    key: &PathKey,
    value: Value,
    customizer: Option<Customizer<'_>>,
) -> Result<(), PathError> {
    match key {
        PathKey::Name(name) => {
            ensure_map(current, customizer).insert(name.clone(), value);
            Ok(())
        }
        PathKey::Index(index) => {
            let items = ensure_list(current, customizer);
            let ix = ensure_list_slot(items, *index)?;
            items[ix] = value;
            Ok(())
        }
    }
}

fn remove_entry(parent: &mut Value, key: &PathKey) -> bool {
    match (key, parent) {
        (PathKey::Name(name), Value::Map(entries)) => {
            entries.make_mut().remove(name).is_some()
        }
        (PathKey::Index(index), Value::List(items)) => {
            match seq_index(items.len(), *index) {
                Some(ix) => {
                    items.make_mut().remove(ix);
                    true
                }
                None => false,
            }
        }
        _ => false,
    }
}

/// Fill a null slot with a fresh container of the hinted kind, letting the
/// customizer supply the value instead.
fn vivify(slot: &mut Value, child_kind: ContainerKind, customizer: Option<Customizer<'_>>) {
    if !slot.is_null() {
        return;
    }
    if let Some(supplied) = customizer.and_then(|c| c(None)) {
        *slot = supplied;
        return;
    }
    *slot = match child_kind {
        ContainerKind::Mapping => Value::empty_map(),
        ContainerKind::Sequence => Value::empty_list(),
    };
}

/// Make `slot` a map, destructively replacing any other shape.
fn ensure_map<'a>(
    slot: &'a mut Value,
    customizer: Option<Customizer<'_>>,
) -> &'a mut HashMap<String, Value> {
    if !matches!(slot, Value::Map(_)) {
        if !slot.is_null() {
            tracing::trace!(existing = slot.type_name(), "replacing value with map on write path");
        }
        let supplied = customizer.and_then(|c| c(Some(&*slot)));
        *slot = match supplied {
            Some(v @ Value::Map(_)) => v,
            _ => Value::empty_map(),
        };
    }
    match slot {
        Value::Map(entries) => entries.make_mut(),
        _ => unreachable!("slot was just coerced to a map"),
    }
}

/// Make `slot` a list, destructively replacing any other shape.
fn ensure_list<'a>(
    slot: &'a mut Value,
    customizer: Option<Customizer<'_>>,
) -> &'a mut Vec<Value> {
    if !matches!(slot, Value::List(_)) {
        if !slot.is_null() {
            tracing::trace!(existing = slot.type_name(), "replacing value with list on write path");
        }
        let supplied = customizer.and_then(|c| c(Some(&*slot)));
        *slot = match supplied {
            Some(v @ Value::List(_)) => v,
            _ => Value::empty_list(),
        };
    }
    match slot {
        Value::List(items) => items.make_mut(),
        _ => unreachable!("slot was just coerced to a list"),
    }
}

/// Resolve a write index, padding the list with nulls past the end.
///
/// Negative indices resolve against the current length and fail when they
/// point before the start.
fn ensure_list_slot(items: &mut Vec<Value>, index: i64) -> Result<usize, PathError> {
    if index >= 0 {
        let ix = usize::try_from(index).map_err(|_| PathError::IndexOutOfBounds {
            index,
            len: items.len(),
        })?;
        if ix >= items.len() {
            items.resize(ix + 1, Value::Null);
        }
        Ok(ix)
    } else {
        seq_index(items.len(), index).ok_or(PathError::IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }
}

#[cfg(test)]
mod tests;
