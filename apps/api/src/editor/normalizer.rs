//! Normalizer — reconciles any persisted or imported JSON value with the canonical
//! empty `Document`.
//!
//! `normalize` is total: whatever arrives (nothing, `{}`, a document from an older
//! schema, hand-edited JSON) comes out as a fully shaped `Document`.
//!
//! Merge rules, applied recursively against the canonical default:
//! - object default → recurse per key; candidate-only keys pass through untouched
//! - array default  → a candidate array replaces it wholesale, anything else keeps the default
//! - scalar default → the candidate wins when present and of the same JSON kind
//!
//! After merging, every repeatable list is re-asserted to be an array, record lists have
//! each element shaped against its entry template, and string lists drop non-strings.

use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use crate::models::{Document, ListKind};

/// String lists outside the record entries.
const STRING_LIST_PATHS: &[&[&str]] = &[
    &["resume", "meta", "keywords"],
    &["resume", "skills", "core"],
    &["resume", "skills", "tools"],
    &["resume", "skills", "soft"],
    &["resume", "skills", "domains"],
];

/// Normalizes `candidate` using today's UTC date for `meta.lastUpdated`.
pub fn normalize(candidate: Option<&Value>) -> Document {
    normalize_at(candidate, Utc::now().date_naive())
}

/// Normalizes `candidate`, stamping a missing `meta.lastUpdated` with `today`.
pub fn normalize_at(candidate: Option<&Value>, today: NaiveDate) -> Document {
    let empty = Document::empty(today);
    let template = match serde_json::to_value(&empty) {
        Ok(template) => template,
        Err(e) => {
            warn!("Default document failed to serialize: {e}");
            return empty;
        }
    };

    // A non-object root carries nothing we can merge.
    let candidate = candidate.filter(|value| value.is_object());
    let mut merged = deep_merge(&template, candidate);
    enforce_lists(&mut merged);

    match serde_json::from_value::<Document>(merged) {
        Ok(document) => document,
        Err(e) => {
            warn!("Normalized document failed to decode, falling back to defaults: {e}");
            empty
        }
    }
}

/// Merges `patch` over `base` without touching either input.
pub fn deep_merge(base: &Value, patch: Option<&Value>) -> Value {
    match base {
        Value::Array(_) => match patch {
            Some(candidate @ Value::Array(_)) => candidate.clone(),
            _ => base.clone(),
        },
        Value::Object(base_map) => {
            let no_keys = Map::new();
            let patch_map = match patch {
                Some(Value::Object(map)) => map,
                _ => &no_keys,
            };

            let mut out = Map::new();
            for (key, default) in base_map {
                out.insert(key.clone(), deep_merge(default, patch_map.get(key)));
            }
            for (key, value) in patch_map {
                if !out.contains_key(key) {
                    out.insert(key.clone(), value.clone());
                }
            }
            Value::Object(out)
        }
        scalar => match patch {
            Some(candidate) if same_kind(scalar, candidate) => candidate.clone(),
            _ => scalar.clone(),
        },
    }
}

/// Whether `candidate` may replace the scalar default `base`. `null` never does.
fn same_kind(base: &Value, candidate: &Value) -> bool {
    match (base, candidate) {
        (Value::String(_), Value::String(_)) | (Value::Bool(_), Value::Bool(_)) => true,
        // Unsigned defaults are counts (max pages): positive and u32-sized only.
        (Value::Number(default), Value::Number(n)) if default.is_u64() => n
            .as_u64()
            .is_some_and(|n| n >= 1 && n <= u64::from(u32::MAX)),
        (Value::Number(_), Value::Number(_)) => true,
        _ => false,
    }
}

fn enforce_lists(document: &mut Value) {
    for kind in ListKind::ALL {
        if let Some(list) = field_mut(document, kind.path()) {
            shape_records(list, kind);
        }
    }
    for path in STRING_LIST_PATHS {
        if let Some(list) = field_mut(document, path) {
            retain_strings(list);
        }
    }
}

fn field_mut<'a>(root: &'a mut Value, path: &[&str]) -> Option<&'a mut Value> {
    path.iter().try_fold(root, |node, key| node.get_mut(*key))
}

/// Shapes every element of a record list against the list's entry template.
/// Elements that are not objects cannot be shaped and are dropped.
fn shape_records(list: &mut Value, kind: ListKind) {
    let items = match list {
        Value::Array(items) => std::mem::take(items),
        _ => Vec::new(),
    };

    let template = kind.entry_template();
    let shaped = items
        .into_iter()
        .filter(Value::is_object)
        .map(|item| {
            let mut entry = deep_merge(&template, Some(&item));
            for field in kind.string_list_fields() {
                if let Some(values) = entry.get_mut(*field) {
                    retain_strings(values);
                }
            }
            entry
        })
        .collect();

    *list = Value::Array(shaped);
}

fn retain_strings(list: &mut Value) {
    match list {
        Value::Array(items) => items.retain(Value::is_string),
        other => *other = Value::Array(Vec::new()),
    }
}
