//! Property tests: both rewrite passes are idempotent and never widen an image.

use adf_babel::{clamp_widths, substitute_ids};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;

fn media_node(node_type: &'static str, width: u64, height: Option<u64>) -> Value {
    let mut attrs = json!({"width": width, "id": "img.png", "collection": "attachments"});
    if let Some(height) = height {
        attrs["height"] = json!(height);
    }
    json!({"type": node_type, "attrs": attrs})
}

fn arb_media() -> impl Strategy<Value = Value> {
    (
        prop::sample::select(vec!["media", "mediaInline", "mediaGroup"]),
        1u64..5000,
        prop::option::of(1u64..5000),
    )
        .prop_map(|(node_type, width, height)| media_node(node_type, width, height))
}

fn arb_tree() -> impl Strategy<Value = Value> {
    prop::collection::vec(arb_media(), 0..6).prop_map(|media| {
        json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": media.clone()},
                {"type": "table", "content": [{"type": "tableRow", "content": [
                    {"type": "tableCell", "content": media}
                ]}]}
            ]
        })
    })
}

fn widths(value: &Value, out: &mut Vec<u64>) {
    match value {
        Value::Object(object) => {
            if let Some(width) = object
                .get("attrs")
                .and_then(|attrs| attrs.get("width"))
                .and_then(Value::as_u64)
            {
                out.push(width);
            }
            for child in object.values() {
                widths(child, out);
            }
        }
        Value::Array(items) => items.iter().for_each(|item| widths(item, out)),
        _ => {}
    }
}

proptest! {
    #[test]
    fn clamp_is_idempotent(tree in arb_tree(), max_width in 1u64..3000) {
        let once = clamp_widths(&tree, Some(max_width));
        let twice = clamp_widths(&once, Some(max_width));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn clamp_never_exceeds_max(tree in arb_tree(), max_width in 1u64..3000) {
        let clamped = clamp_widths(&tree, Some(max_width));
        let mut found = Vec::new();
        widths(&clamped, &mut found);
        prop_assert!(found.iter().all(|width| *width <= max_width));
    }

    #[test]
    fn substitute_is_idempotent(tree in arb_tree()) {
        let ids = HashMap::from([("img.png".to_string(), "att-77".to_string())]);
        let once = substitute_ids(&tree, &ids);
        let twice = substitute_ids(&once, &ids);
        prop_assert_eq!(once, twice);
    }
}
