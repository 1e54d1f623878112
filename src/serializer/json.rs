//! Rails JSON codec.
//!
//! Rails JSON wraps a single resource under its singular root key
//! (`{"person": {...}}`) and keeps field keys underscored. This module
//! handles the wrap/unwrap and the (usually identity) key translation for
//! aliased fields; scalar typing comes for free from JSON itself, and
//! `null` already expresses the nil marker.

use serde_json::Value;

use crate::error::ResourceError;
use crate::naming::FieldMap;

/// Encodes a value tree as a root-wrapped JSON document.
///
/// # Errors
///
/// Returns [`ResourceError::Decode`] if the tree cannot be written, which
/// for a `Value` does not normally occur.
pub fn encode_document(
    root: &str,
    value: &Value,
    map: &FieldMap,
) -> Result<String, ResourceError> {
    let mut document = serde_json::Map::new();
    document.insert(root.to_string(), wire_keys(value, map));
    Ok(serde_json::to_string(&Value::Object(document))?)
}

/// Decodes a single root-wrapped resource document.
///
/// A bare, unwrapped object is also accepted; only an object whose sole
/// key equals the root name is unwrapped.
///
/// # Errors
///
/// Returns [`ResourceError::Decode`] for malformed JSON.
pub fn decode_one(payload: &str, map: &FieldMap) -> Result<Value, ResourceError> {
    let value: Value = serde_json::from_str(payload)?;
    Ok(local_keys(&unwrap_root(value, map.root()), map))
}

/// Decodes a collection document into an array value.
///
/// Accepts a top-level array, or an array wrapped under the collection
/// name. Each member may itself be root-wrapped.
///
/// # Errors
///
/// Returns [`ResourceError::Decode`] for malformed JSON.
pub fn decode_many(payload: &str, map: &FieldMap) -> Result<Value, ResourceError> {
    let value: Value = serde_json::from_str(payload)?;
    let members = unwrap_root(value, map.collection_name());
    match members {
        Value::Array(items) => Ok(Value::Array(
            items
                .into_iter()
                .map(|item| local_keys(&unwrap_root(item, map.root()), map))
                .collect(),
        )),
        other => Ok(other),
    }
}

fn unwrap_root(value: Value, root: &str) -> Value {
    match value {
        Value::Object(mut object) if object.len() == 1 && object.contains_key(root) => {
            object.remove(root).unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn wire_keys(value: &Value, map: &FieldMap) -> Value {
    translate_keys(value, &|local| map.wire_name(local))
}

fn local_keys(value: &Value, map: &FieldMap) -> Value {
    translate_keys(value, &|wire| map.local_name(wire))
}

fn translate_keys(value: &Value, translate: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, v)| (translate(key), translate_keys(v, translate)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items.iter().map(|v| translate_keys(v, translate)).collect(),
        ),
        scalar => scalar.clone(),
    }
}
