//! Images.

use super::inline::render_text;
use super::serializer::render;
use crate::context::Context;
use crate::ir::nodes::{Node, NodeKind};

/// Resolves the file name of an attachment from its media id.
///
/// Looks in the attachment map first, then in the page's media listing. Unknown ids become
/// `<id>.<default extension>`. Names without any extension get the default one.
pub fn resolve_filename(id: &str, ctx: &Context<'_>) -> String {
    let options = &ctx.options;
    let extension = &options.default_image_extension;
    let known = options
        .file_id_to_filename
        .get(id)
        .filter(|name| !name.is_empty())
        .or_else(|| {
            options
                .media_files
                .iter()
                .find(|file| file.id == id)
                .map(|file| &file.title)
                .filter(|title| !title.is_empty())
        });

    match known {
        Some(name) if name.contains('.') => name.clone(),
        Some(name) => format!("{name}.{extension}"),
        None => format!("{id}.{extension}"),
    }
}

pub fn media(node: &Node, ctx: &mut Context<'_>) -> String {
    image_block(node, None, ctx)
}

/// A block image; a sibling caption becomes the image title.
pub fn media_single<'a>(node: &'a Node, ctx: &mut Context<'a>) -> Vec<String> {
    let Some(media) = node
        .content
        .iter()
        .find(|child| child.kind() == NodeKind::Media)
    else {
        return Vec::new();
    };

    let caption = node
        .content
        .iter()
        .find(|child| child.kind() == NodeKind::Caption);
    let caption_text = caption.map(|caption| render_text(caption, ctx));

    let mut out = vec![format!(
        "\n{}",
        image_block(media, caption_text.as_deref(), ctx)
    )];
    if let Some(caption) = caption {
        ctx.consume(caption);
    }
    for child in &node.content {
        if !std::ptr::eq(child, media) {
            out.extend(render(child, ctx, ""));
        }
    }
    out
}

pub fn media_inline(node: &Node, ctx: &mut Context<'_>) -> String {
    let filename = resolve_filename(node.attr_str("id").unwrap_or(""), ctx);
    let alt = node
        .attr_str("alt")
        .filter(|alt| !alt.is_empty() && *alt != filename)
        .unwrap_or("");
    format!("image:{filename}[{alt}]")
}

fn image_block(node: &Node, caption: Option<&str>, ctx: &Context<'_>) -> String {
    let filename = resolve_filename(node.attr_str("id").unwrap_or(""), ctx);
    let title = caption
        .map(str::trim)
        .filter(|caption| !caption.is_empty())
        .or_else(|| node.attr_str("alt").filter(|alt| !alt.is_empty()));

    match title {
        Some(title) if title != filename => format!(".{title}\nimage::{filename}[]\n"),
        _ => format!("image::{filename}[]\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{MediaFile, RenderOptions};
    use serde_json::{json, Value};

    fn node(value: Value) -> Node {
        Node::from_value(value).unwrap()
    }

    fn options() -> RenderOptions {
        RenderOptions::new()
            .with_attachment("file-1", "diagram.png")
            .with_attachment("file-2", "scan")
            .with_media_files(vec![MediaFile {
                id: "file-3".into(),
                title: "photo.jpg".into(),
            }])
    }

    #[test]
    fn test_filename_resolution() {
        let ctx = Context::new(options());
        assert_eq!(resolve_filename("file-1", &ctx), "diagram.png");
        assert_eq!(resolve_filename("file-2", &ctx), "scan.png");
        assert_eq!(resolve_filename("file-3", &ctx), "photo.jpg");
        assert_eq!(resolve_filename("file-9", &ctx), "file-9.png");
    }

    #[test]
    fn test_media_with_alt() {
        let image = node(json!({"type": "media", "attrs": {"id": "file-1", "alt": "Architecture"}}));
        let mut ctx = Context::new(options());
        assert_eq!(
            media(&image, &mut ctx),
            ".Architecture\nimage::diagram.png[]\n"
        );
    }

    #[test]
    fn test_alt_equal_to_filename_is_dropped() {
        let image = node(json!({"type": "media", "attrs": {"id": "file-1", "alt": "diagram.png"}}));
        let mut ctx = Context::new(options());
        assert_eq!(media(&image, &mut ctx), "image::diagram.png[]\n");
    }

    #[test]
    fn test_media_single_uses_caption_once() {
        let single = node(json!({
            "type": "mediaSingle",
            "attrs": {"layout": "center"},
            "content": [
                {"type": "media", "attrs": {"id": "file-1", "alt": "ignored"}},
                {"type": "caption", "content": [{"type": "text", "text": "System overview"}]}
            ]
        }));
        let mut ctx = Context::new(options());
        assert_eq!(
            media_single(&single, &mut ctx).concat(),
            "\n.System overview\nimage::diagram.png[]\n"
        );
        assert!(!ctx.take_consumed(&single.content[1]));
    }

    #[test]
    fn test_media_single_without_media() {
        let single = node(json!({"type": "mediaSingle", "content": []}));
        let mut ctx = Context::new(options());
        assert!(media_single(&single, &mut ctx).is_empty());
    }

    #[test]
    fn test_media_inline() {
        let image = node(json!({"type": "mediaInline", "attrs": {"id": "file-3"}}));
        let mut ctx = Context::new(options());
        assert_eq!(media_inline(&image, &mut ctx), "image:photo.jpg[]");
    }
}
