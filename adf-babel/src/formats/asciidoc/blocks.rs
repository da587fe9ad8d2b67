//! Paragraphs, headings, code blocks, panels and rules.

use super::inline::render_text;
use super::serializer::render_children;
use crate::context::Context;
use crate::ir::nodes::Node;

pub fn paragraph<'a>(node: &'a Node, ctx: &mut Context<'a>, indent: &str) -> Vec<String> {
    let text = render_text(node, ctx);
    if text.trim().is_empty() {
        return Vec::new();
    }
    vec![format!("{indent}{text}\n\n")]
}

pub fn heading<'a>(node: &'a Node, ctx: &mut Context<'a>) -> Vec<String> {
    let level = node.attr_u64("level").unwrap_or(1).clamp(1, 6) as usize;
    let text = render_text(node, ctx);
    vec![format!("\n{} {}\n", "=".repeat(level), text.trim())]
}

/// A listing block; the code is emitted verbatim.
pub fn code_block(node: &Node) -> Vec<String> {
    let header = match node.attr_str("language").filter(|lang| !lang.is_empty()) {
        Some(language) => format!("\n[source,{language}]"),
        None => "\n[source]".to_string(),
    };
    vec![
        header,
        "\n----".to_string(),
        format!("\n{}", node.plain_text()),
        "\n----\n".to_string(),
    ]
}

/// An admonition block, typed after the panel's colour.
pub fn panel<'a>(node: &'a Node, ctx: &mut Context<'a>) -> Vec<String> {
    let admonition = match node.attr_str("panelType").unwrap_or("info") {
        "tip" | "success" => "TIP",
        "warning" => "WARNING",
        "error" => "CAUTION",
        _ => "NOTE",
    };
    let body = render_children(node, ctx, "").concat();
    vec![format!("\n[{admonition}]\n====\n{}\n====\n", body.trim())]
}

pub fn rule() -> Vec<String> {
    vec!["\n'''\n".to_string()]
}
