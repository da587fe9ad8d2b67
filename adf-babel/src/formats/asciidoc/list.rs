//! Bullet, ordered and task lists.
//!
//! Nesting is tracked by `Scope::list_depth`, shared by both list kinds: an ordered list inside
//! a bullet list uses `..` markers. Items of nested lists are indented by two spaces per level
//! below an item's first paragraph. Inside a table cell the outer indentation is dropped, since
//! cell content starts at the cell's own margin.

use super::inline::render_text;
use super::serializer::render;
use crate::context::{Context, Scope};
use crate::ir::nodes::{Node, NodeKind};

pub fn list<'a>(node: &'a Node, ctx: &mut Context<'a>, indent: &str) -> Vec<String> {
    let scope = Scope {
        list_depth: ctx.scope.list_depth + 1,
        in_bullet_list: node.kind() != NodeKind::OrderedList,
        ..ctx.scope
    };
    let items = ctx.with_scope(scope, |ctx| {
        node.content
            .iter()
            .filter(|child| child.kind() == NodeKind::ListItem)
            .map(|child| item(child, ctx, indent))
            .collect::<Vec<_>>()
    });
    wrap_items(items, ctx)
}

pub fn item<'a>(node: &'a Node, ctx: &mut Context<'a>, indent: &str) -> String {
    let marker = marker(&ctx.scope);
    let para_indent = if ctx.scope.in_table_cell { "" } else { indent };
    let mut lines: Vec<String> = Vec::new();

    for child in &node.content {
        let kind = child.kind();
        if kind == NodeKind::Paragraph && lines.is_empty() {
            let text = render(child, ctx, "").concat();
            lines.push(format!("{para_indent}{marker} {}", text.trim_end()));
        } else if kind.is_list() && lines.is_empty() {
            let nested = render(child, ctx, indent).concat();
            lines.push(format!(
                "{para_indent}{marker}\n{}",
                nested.trim_start_matches('\n')
            ));
        } else if kind.is_list() {
            let nested = render(child, ctx, &format!("{indent}  ")).concat();
            lines.push(nested.trim_start_matches('\n').to_string());
        } else {
            let content = render(child, ctx, "").concat();
            let content = content.trim_start_matches('\n').trim_end();
            if content.is_empty() {
                continue;
            }
            if lines.is_empty() {
                lines.push(format!("{para_indent}{marker}"));
            }
            lines.push(format!("{indent}  {content}"));
        }
    }

    lines.join("\n")
}

/// A checklist; items carry `[x]` or `[ ]` after a bullet marker.
pub fn task_list<'a>(node: &'a Node, ctx: &mut Context<'a>, indent: &str) -> Vec<String> {
    let scope = Scope {
        list_depth: ctx.scope.list_depth + 1,
        in_bullet_list: true,
        ..ctx.scope
    };
    let items = ctx.with_scope(scope, |ctx| {
        let mut items = Vec::new();
        for child in &node.content {
            match child.kind() {
                NodeKind::TaskItem => items.push(task_item(child, ctx, indent)),
                NodeKind::TaskList => {
                    let nested = render(child, ctx, &format!("{indent}  ")).concat();
                    items.push(nested.trim_start_matches('\n').to_string());
                }
                _ => {}
            }
        }
        items
    });
    wrap_items(items, ctx)
}

pub fn task_item<'a>(node: &'a Node, ctx: &mut Context<'a>, indent: &str) -> String {
    let marker = "*".repeat(ctx.scope.list_depth.max(1));
    let para_indent = if ctx.scope.in_table_cell { "" } else { indent };
    let checkbox = if node.attr_str("state") == Some("DONE") {
        "[x]"
    } else {
        "[ ]"
    };
    let text = render_text(node, ctx);
    format!("{para_indent}{marker} {checkbox} {}", text.trim())
}

fn marker(scope: &Scope) -> String {
    let symbol = if scope.in_bullet_list { "*" } else { "." };
    symbol.repeat(scope.list_depth.max(1))
}

/// The outermost list is set apart by blank lines; nested lists and lists in cells are not.
fn wrap_items(items: Vec<String>, ctx: &Context<'_>) -> Vec<String> {
    if items.is_empty() {
        return Vec::new();
    }
    let joined = items.join("\n");
    if ctx.scope.list_depth == 0 && !ctx.scope.in_table_cell {
        vec![format!("\n{joined}\n\n")]
    } else {
        vec![format!("\n{joined}")]
    }
}
