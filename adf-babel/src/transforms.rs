//! Whole-tree rewrite passes
//!
//! These work on the raw JSON tree rather than on [`Node`](crate::ir::nodes::Node) so that
//! every field, known or not, survives the round trip back to the wiki. Both passes return a
//! rewritten copy and leave their input untouched. Both are idempotent.

use crate::error::ConvertError;
use serde_json::{Map, Value};
use std::collections::HashMap;

const MEDIA_TYPES: &[&str] = &["media", "mediaInline"];
const SIZED_MEDIA_TYPES: &[&str] = &["media", "mediaInline", "mediaGroup"];

/// Replaces attachment file names used as media ids with the ids the wiki assigned.
///
/// Only media in the `attachments` collection whose id is a key of `filename_to_id` change.
///
/// # Example
///
/// ```
/// use adf_babel::transforms::substitute_ids;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let tree = json!({"type": "media", "attrs": {"id": "a.png", "collection": "attachments"}});
/// let ids = HashMap::from([("a.png".to_string(), "att-1".to_string())]);
/// assert_eq!(substitute_ids(&tree, &ids)["attrs"]["id"], "att-1");
/// ```
pub fn substitute_ids(tree: &Value, filename_to_id: &HashMap<String, String>) -> Value {
    let mut updated = tree.clone();
    if is_empty_tree(tree) || filename_to_id.is_empty() {
        return updated;
    }

    visit_objects_mut(&mut updated, &mut |object| {
        if !has_type(object, MEDIA_TYPES) {
            return;
        }
        let Some(attrs) = object.get_mut("attrs").and_then(Value::as_object_mut) else {
            return;
        };
        if attrs.get("collection").and_then(Value::as_str) != Some("attachments") {
            return;
        }
        let replacement = attrs
            .get("id")
            .and_then(Value::as_str)
            .and_then(|id| filename_to_id.get(id));
        if let Some(new_id) = replacement {
            let new_id = Value::String(new_id.clone());
            attrs.insert("id".to_string(), new_id);
        }
    });
    updated
}

/// Scales down media wider than `max_width`, keeping the aspect ratio.
///
/// `None` or `0` disables the pass. Widths that are not numbers (such as `"auto"`) are left
/// alone, as are heights when the node has none. `mediaSingle` wrappers keep their width, which
/// is a layout value rather than pixels.
pub fn clamp_widths(tree: &Value, max_width: Option<u64>) -> Value {
    let mut updated = tree.clone();
    let Some(max_width) = max_width.filter(|width| *width > 0) else {
        return updated;
    };
    if is_empty_tree(tree) {
        return updated;
    }

    visit_objects_mut(&mut updated, &mut |object| {
        if !has_type(object, SIZED_MEDIA_TYPES) {
            return;
        }
        let Some(attrs) = object.get_mut("attrs").and_then(Value::as_object_mut) else {
            return;
        };
        let Some(width) = attrs.get("width").and_then(Value::as_f64) else {
            return;
        };
        if width <= max_width as f64 {
            return;
        }

        attrs.insert("width".to_string(), Value::from(max_width));
        if let Some(height) = attrs.get("height").and_then(Value::as_f64) {
            let scaled = (max_width as f64 * height / width).round() as u64;
            attrs.insert("height".to_string(), Value::from(scaled));
        }
    });
    updated
}

/// Pretty-prints a rewritten tree for upload, with a trailing newline.
pub fn to_pretty_json(tree: &Value) -> Result<String, ConvertError> {
    let json = serde_json::to_string_pretty(tree)
        .map_err(|err| ConvertError::SerializationError(err.to_string()))?;
    Ok(format!("{json}\n"))
}

fn is_empty_tree(tree: &Value) -> bool {
    match tree {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn has_type(object: &Map<String, Value>, types: &[&str]) -> bool {
    object
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|node_type| types.contains(&node_type))
}

fn visit_objects_mut(value: &mut Value, visit: &mut dyn FnMut(&mut Map<String, Value>)) {
    match value {
        Value::Object(object) => {
            visit(object);
            for child in object.values_mut() {
                visit_objects_mut(child, visit);
            }
        }
        Value::Array(items) => {
            for item in items {
                visit_objects_mut(item, visit);
            }
        }
        _ => {}
    }
}
