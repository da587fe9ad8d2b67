//! Same-page anchors only resolve once the anchor macro has been seen.

use adf_babel::{to_asciidoc, Node, RenderOptions};
use serde_json::{json, Value};

fn anchor(name: &str) -> Value {
    json!({
        "type": "inlineExtension",
        "attrs": {
            "extensionKey": "anchor",
            "parameters": {"macroParams": {"": {"value": name}}}
        }
    })
}

fn link_to(name: &str) -> Value {
    json!({
        "type": "text",
        "text": name,
        "marks": [{"type": "link", "attrs": {"href": format!("#{name}")}}]
    })
}

#[test]
fn test_link_before_anchor_stays_external() {
    let doc = Node::from_value(json!({
        "type": "doc",
        "content": [
            {"type": "paragraph", "content": [link_to("later")]},
            {"type": "paragraph", "content": [anchor("later"), {"type": "text", "text": "Here"}]},
            {"type": "paragraph", "content": [link_to("later")]}
        ]
    }))
    .unwrap();

    let output = to_asciidoc(&doc, None, RenderOptions::default());
    assert_eq!(
        output,
        ":imagesdir: images\n\nlink:#later[later]\n\n[[later]]Here\n\n<<later,later>>\n\n"
    );
}

#[test]
fn test_anchor_in_table_cell_is_visible_after_the_table() {
    let doc = Node::from_value(json!({
        "type": "doc",
        "content": [
            {"type": "table", "content": [{"type": "tableRow", "content": [
                {"type": "tableCell", "content": [
                    {"type": "paragraph", "content": [anchor("cell")]}
                ]}
            ]}]},
            {"type": "paragraph", "content": [link_to("cell")]}
        ]
    }))
    .unwrap();

    let output = to_asciidoc(&doc, None, RenderOptions::default());
    assert!(output.contains("| [[cell]]\n|===\n"));
    assert!(output.ends_with("<<cell,cell>>\n\n"));
}
