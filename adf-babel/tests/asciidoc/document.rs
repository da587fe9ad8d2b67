//! Kitchensink conversion, checked against a snapshot.

use adf_babel::{to_asciidoc, Node, PageInfo, RenderOptions};
use insta::assert_snapshot;

const KITCHENSINK: &str = include_str!("fixtures/kitchensink.json");

fn kitchensink_options() -> RenderOptions {
    RenderOptions::new()
        .with_base_url("https://wiki.example.com")
        .with_jira_base_url("https://jira.example.com")
        .with_current_file_path("out/Kitchen Sink.adoc")
        .with_attachment("file-1", "diagram.png")
        .with_page(
            "200",
            PageInfo {
                title: "Install Guide".to_string(),
                path: Some("out/guides/Guide.adoc".into()),
            },
        )
}

#[test]
fn test_kitchensink() {
    let doc = Node::from_json_str(KITCHENSINK).expect("fixture parses");
    let output = to_asciidoc(&doc, Some("Kitchen Sink"), kitchensink_options());
    insta::with_settings!({ prepend_module_to_snapshot => false }, {
        assert_snapshot!("kitchensink", output);
    });
}

#[test]
fn test_kitchensink_without_mapping_falls_back_to_links() {
    let doc = Node::from_json_str(KITCHENSINK).expect("fixture parses");
    let output = to_asciidoc(&doc, None, RenderOptions::default());
    assert!(output.starts_with(":imagesdir: images\n\n"));
    assert!(output.contains(
        "link:https://wiki.example.com/wiki/spaces/DOC/pages/200/Install#Setup[the guide]"
    ));
    assert!(output.contains("link:https://jira.example.com/browse/TEST-9[TEST-9]"));
    assert!(output.contains("image::file-1.png[]"));
}
