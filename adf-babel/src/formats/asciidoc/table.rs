//! Tables.
//!
//! Cells holding lists, code or panels (or anything spanning several lines) are emitted as
//! AsciiDoc cells (`a|`) so their content is parsed as blocks. All other cells are plain and
//! have their pipes escaped.

use super::serializer::render;
use crate::context::{Context, Scope};
use crate::ir::nodes::{Node, NodeKind};

/// A rendered cell and whether it needs the AsciiDoc cell style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    pub complex: bool,
}

pub fn table<'a>(node: &'a Node, ctx: &mut Context<'a>) -> String {
    let mut out = String::from("|===\n");
    for child in &node.content {
        out.push_str(&row(child, ctx));
    }
    out.push_str("|===\n");
    out
}

pub fn row<'a>(node: &'a Node, ctx: &mut Context<'a>) -> String {
    let cells: Vec<String> = node
        .content
        .iter()
        .map(|child| {
            let rendered = cell(child, ctx);
            let style = if rendered.complex { "a" } else { "" };
            format!("{}{style}| {}", span(child), rendered.text)
        })
        .collect();
    format!("{}\n", cells.join(" "))
}

pub fn cell<'a>(node: &'a Node, ctx: &mut Context<'a>) -> RenderedCell {
    let scope = Scope {
        in_table_cell: true,
        ..ctx.scope
    };
    ctx.with_scope(scope, |ctx| {
        let mut lines: Vec<String> = Vec::new();
        let mut has_complex_block = false;
        let mut previous_was_paragraph = false;

        for child in &node.content {
            let complex = is_complex_block(child);
            if complex && previous_was_paragraph && !lines.is_empty() {
                lines.push(String::new());
            }
            has_complex_block |= complex;
            previous_was_paragraph = child.kind() == NodeKind::Paragraph;

            let rendered = render(child, ctx, "").concat();
            let rendered = rendered.trim();
            if !rendered.is_empty() {
                lines.push(rendered.to_string());
            }
        }

        let mut text = lines.join("\n");
        if !has_complex_block {
            text = text.replace('|', "\\|").replace("\\\\|", "\\|");
        }
        let complex = has_complex_block || text.contains('\n');
        RenderedCell { text, complex }
    })
}

fn is_complex_block(node: &Node) -> bool {
    matches!(
        node.kind(),
        NodeKind::BulletList
            | NodeKind::OrderedList
            | NodeKind::TaskList
            | NodeKind::CodeBlock
            | NodeKind::Panel
    )
}

/// The span specifier of a cell: `2+` for two columns, `.3+` for three rows, `2.3+` for both.
fn span(node: &Node) -> String {
    let colspan = node.attr_u64("colspan").filter(|n| *n > 1);
    let rowspan = node.attr_u64("rowspan").filter(|n| *n > 1);
    match (colspan, rowspan) {
        (Some(cols), Some(rows)) => format!("{cols}.{rows}+"),
        (Some(cols), None) => format!("{cols}+"),
        (None, Some(rows)) => format!(".{rows}+"),
        (None, None) => String::new(),
    }
}
