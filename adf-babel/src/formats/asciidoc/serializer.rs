//! Node dispatch for AsciiDoc output.
//!
//! Every renderer returns a list of fragments; callers concatenate them. Nothing here fails:
//! node types without a rule render their children, or nothing when they have none.

use super::{blocks, inline, list, media, table};
use crate::context::Context;
use crate::ir::nodes::{Node, NodeKind};

/// Renders one node, indenting list content with `indent`.
pub fn render<'a>(node: &'a Node, ctx: &mut Context<'a>, indent: &str) -> Vec<String> {
    if ctx.take_consumed(node) {
        return Vec::new();
    }

    match node.kind() {
        NodeKind::Paragraph => blocks::paragraph(node, ctx, indent),
        NodeKind::Heading => blocks::heading(node, ctx),
        NodeKind::CodeBlock => blocks::code_block(node),
        NodeKind::Panel => blocks::panel(node, ctx),
        NodeKind::Rule => blocks::rule(),
        NodeKind::Table => vec![table::table(node, ctx)],
        NodeKind::TableRow => vec![table::row(node, ctx)],
        NodeKind::TableCell | NodeKind::TableHeader => vec![table::cell(node, ctx).text],
        NodeKind::Media => vec![media::media(node, ctx)],
        NodeKind::MediaSingle => media::media_single(node, ctx),
        NodeKind::MediaInline => vec![media::media_inline(node, ctx)],
        NodeKind::BulletList | NodeKind::OrderedList => list::list(node, ctx, indent),
        NodeKind::ListItem => vec![list::item(node, ctx, indent)],
        NodeKind::TaskList => list::task_list(node, ctx, indent),
        NodeKind::TaskItem => vec![list::task_item(node, ctx, indent)],
        NodeKind::Extension => ctx.extensions().render_block(node, ctx),
        NodeKind::InlineExtension => ctx.extensions().render_inline(node, ctx),
        NodeKind::Text => vec![inline::render_text(node, ctx)],
        NodeKind::HardBreak => vec![" +\n".to_string()],
        NodeKind::Mention => vec![inline::mention(node, ctx)],
        NodeKind::InlineCard => vec![inline::inline_card(node, ctx)],
        NodeKind::Emoji => vec![inline::emoji(node)],
        NodeKind::Doc | NodeKind::MediaGroup | NodeKind::Caption => {
            render_children(node, ctx, indent)
        }
        NodeKind::Unknown => {
            log::trace!("rendering unknown node type '{}' transparently", node.node_type);
            render_children(node, ctx, indent)
        }
    }
}

/// Renders the children of `node` in order.
pub fn render_children<'a>(node: &'a Node, ctx: &mut Context<'a>, indent: &str) -> Vec<String> {
    node.content
        .iter()
        .flat_map(|child| render(child, ctx, indent))
        .collect()
}
