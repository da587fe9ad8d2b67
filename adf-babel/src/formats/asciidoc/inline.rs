//! Inline rendering: text with marks, mentions, cards and emoji.

use super::serializer::render_children;
use crate::common::links;
use crate::context::Context;
use crate::ir::nodes::{MarkKind, Node, NodeKind};

/// Renders a text node with its marks, or the inline content of any other node.
///
/// Formatting marks wrap the text in the order they appear. A link mark is applied last,
/// around the formatted text. Inside a table cell every `|` is escaped.
pub fn render_text<'a>(node: &'a Node, ctx: &mut Context<'a>) -> String {
    if node.kind() != NodeKind::Text {
        return render_children(node, ctx, "").concat();
    }

    let raw = node.text();
    let core = raw.trim_end();
    if core.is_empty() {
        return escape_for_cell(raw.to_string(), ctx);
    }
    let trailing = &raw[core.len()..];

    let mut text = core.to_string();
    let mut href = None;
    for mark in &node.marks {
        text = match mark.kind() {
            MarkKind::Strong => format!("*{text}*"),
            MarkKind::Em => format!("_{text}_"),
            MarkKind::Code => format!("`{text}`"),
            MarkKind::Strike => format!("[.line-through]#{text}#"),
            MarkKind::Underline => format!("[.underline]#{text}#"),
            MarkKind::Sub => format!("~{text}~"),
            MarkKind::Sup => format!("^{text}^"),
            MarkKind::Link => {
                href = mark.attr_str("href");
                text
            }
            MarkKind::Other => text,
        };
    }

    if let Some(href) = href {
        text = links::render_link(href, &text, ctx);
    }
    text.push_str(trailing);
    escape_for_cell(text, ctx)
}

/// `@Display Name`, recording the username for the caller.
pub fn mention(node: &Node, ctx: &mut Context<'_>) -> String {
    let id = node.attr_str("id").unwrap_or("");
    let display = node.attr_str("text").unwrap_or("");
    let username = display.trim_start_matches('@');

    if !username.is_empty() && !id.is_empty() {
        ctx.record_mention(username, id);
    }

    let text = if username.is_empty() {
        format!("@{id}")
    } else {
        format!("@{username}")
    };
    escape_for_cell(text, ctx)
}

/// A smart link, shown with the title of the page it points to when one is known.
pub fn inline_card(node: &Node, ctx: &mut Context<'_>) -> String {
    let Some(url) = node.attr_str("url").filter(|url| !url.is_empty()) else {
        return String::new();
    };

    let mapped_title = links::extract_page_id(url)
        .and_then(|id| ctx.options.page_mapping.get(&id))
        .map(|page| page.title.clone())
        .filter(|title| !title.is_empty());
    let title = mapped_title
        .or_else(|| ctx.resolve_title(url))
        .unwrap_or_else(|| url.to_string());

    let text = links::render_link(url, &title, ctx);
    escape_for_cell(text, ctx)
}

pub fn emoji(node: &Node) -> String {
    node.attr_str("text")
        .filter(|text| !text.is_empty())
        .or_else(|| node.attr_str("shortName"))
        .unwrap_or("")
        .to_string()
}

fn escape_for_cell(text: String, ctx: &Context<'_>) -> String {
    if ctx.scope.in_table_cell {
        text.replace('|', "\\|")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{PageInfo, RenderOptions, Scope};
    use serde_json::{json, Value};

    fn node(value: Value) -> Node {
        Node::from_value(value).unwrap()
    }

    fn text(value: &str, marks: Value) -> Node {
        node(json!({"type": "text", "text": value, "marks": marks}))
    }

    fn render_plain(node: &Node) -> String {
        let mut ctx = Context::new(RenderOptions::default());
        render_text(node, &mut ctx)
    }

    #[test]
    fn test_marks() {
        assert_eq!(render_plain(&text("bold", json!([{"type": "strong"}]))), "*bold*");
        assert_eq!(render_plain(&text("it", json!([{"type": "em"}]))), "_it_");
        assert_eq!(render_plain(&text("x()", json!([{"type": "code"}]))), "`x()`");
        assert_eq!(
            render_plain(&text("gone", json!([{"type": "strike"}]))),
            "[.line-through]#gone#"
        );
        assert_eq!(
            render_plain(&text("under", json!([{"type": "underline"}]))),
            "[.underline]#under#"
        );
        assert_eq!(
            render_plain(&text("2", json!([{"type": "subsup", "attrs": {"type": "sub"}}]))),
            "~2~"
        );
        assert_eq!(
            render_plain(&text("n", json!([{"type": "subsup", "attrs": {"type": "sup"}}]))),
            "^n^"
        );
        assert_eq!(
            render_plain(&text("plain", json!([{"type": "textColor"}]))),
            "plain"
        );
    }

    #[test]
    fn test_marks_apply_in_order() {
        assert_eq!(
            render_plain(&text("both", json!([{"type": "strong"}, {"type": "em"}]))),
            "_*both*_"
        );
    }

    #[test]
    fn test_trailing_whitespace_moves_outside_marks() {
        assert_eq!(render_plain(&text("bold ", json!([{"type": "strong"}]))), "*bold* ");
        assert_eq!(render_plain(&text("  ", json!([{"type": "strong"}]))), "  ");
    }

    #[test]
    fn test_link_with_and_without_formatting() {
        assert_eq!(
            render_plain(&text(
                "Ada website",
                json!([{"type": "link", "attrs": {"href": "https://ada.com"}}])
            )),
            "link:https://ada.com[Ada website]"
        );
        assert_eq!(
            render_plain(&text(
                "Ada",
                json!([{"type": "link", "attrs": {"href": "https://ada.com"}}, {"type": "strong"}])
            )),
            "*link:https://ada.com[Ada]*"
        );
    }

    #[test]
    fn test_issue_link_discards_text_and_marks() {
        let node = text(
            "See issue",
            json!([
                {"type": "strong"},
                {"type": "link", "attrs": {"href": "https://jira.example.com/browse/TEST-123"}}
            ]),
        );
        let mut ctx = Context::new(RenderOptions::new().with_jira_base_url("https://jira.example.com"));
        assert_eq!(render_text(&node, &mut ctx), "jira:TEST-123[]");
    }

    #[test]
    fn test_pipes_escaped_in_table_cells_only() {
        let node = text("a | b", json!([]));
        let mut ctx = Context::new(RenderOptions::default());
        assert_eq!(render_text(&node, &mut ctx), "a | b");
        let cell = Scope {
            in_table_cell: true,
            ..Scope::default()
        };
        let out = ctx.with_scope(cell, |ctx| render_text(&node, ctx));
        assert_eq!(out, "a \\| b");
    }

    #[test]
    fn test_paragraph_content_concatenates_inline_nodes() {
        let para = node(json!({
            "type": "paragraph",
            "content": [
                {"type": "text", "text": "Hi "},
                {"type": "mention", "attrs": {"id": "557058:abc", "text": "@Jane Doe"}},
                {"type": "text", "text": " "},
                {"type": "emoji", "attrs": {"shortName": ":smile:", "text": "😄"}}
            ]
        }));
        let mut ctx = Context::new(RenderOptions::default());
        assert_eq!(render_text(&para, &mut ctx), "Hi @Jane Doe 😄");
        assert_eq!(
            ctx.mentions().get("Jane Doe").map(String::as_str),
            Some("557058:abc")
        );
    }

    #[test]
    fn test_emoji_falls_back_to_short_name() {
        assert_eq!(emoji(&node(json!({"type": "emoji", "attrs": {"shortName": ":x:"}}))), ":x:");
    }

    #[test]
    fn test_inline_card_titles() {
        let card = node(json!({
            "type": "inlineCard",
            "attrs": {"url": "https://wiki.example.com/wiki/spaces/D/pages/42/Guide"}
        }));
        let options = RenderOptions::new()
            .with_base_url("https://wiki.example.com")
            .with_current_file_path("Home.adoc")
            .with_page(
                "42",
                PageInfo {
                    title: "Guide".into(),
                    path: Some("guide/Guide.adoc".into()),
                },
            );
        let mut ctx = Context::new(options);
        assert_eq!(inline_card(&card, &mut ctx), "xref:guide/Guide.adoc[Guide]");

        let external = node(json!({"type": "inlineCard", "attrs": {"url": "https://rust-lang.org"}}));
        let mut ctx = Context::new(RenderOptions::default());
        assert_eq!(
            inline_card(&external, &mut ctx),
            "link:https://rust-lang.org[https://rust-lang.org]"
        );

        let resolver = |_: &str| Some("The Rust Language".to_string());
        let mut ctx = Context::new(RenderOptions::default()).with_title_resolver(&resolver);
        assert_eq!(
            inline_card(&external, &mut ctx),
            "link:https://rust-lang.org[The Rust Language]"
        );
    }
}
