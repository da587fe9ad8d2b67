//! AsciiDoc format implementation
//!
//! This module converts Atlassian Document Format trees to AsciiDoc. The conversion is one
//! way and best effort: every node renders to something, possibly nothing.
//!
//! # Element Mapping Table
//!
//! | ADF Node            | AsciiDoc Equivalent                 | Notes                                       |
//! |---------------------|-------------------------------------|---------------------------------------------|
//! | heading             | `== Title`                          | `=` repeated `level` times                  |
//! | paragraph           | Paragraph                           | Blank line after                            |
//! | bulletList          | `* item`                            | `*` repeated by nesting depth               |
//! | orderedList         | `. item`                            | Depth shared with bullet lists              |
//! | taskList / taskItem | `* [x] item`                        | `[ ]` unless state is DONE                  |
//! | table               | `\|===` block                       | List/code/panel cells use `a\|`             |
//! | codeBlock           | `[source,lang]` listing             | Code kept verbatim                          |
//! | panel               | Admonition block                    | Panel type picks NOTE/TIP/WARNING/CAUTION   |
//! | media / mediaSingle | `image::file[]`                     | Alt or caption as block title               |
//! | mediaInline         | `image:file[]`                      |                                             |
//! | rule                | `'''`                               |                                             |
//! | extension           | Handler output                      | See `crate::extensions`                     |
//! | Marks:              |                                     |                                             |
//! |   strong / em       | `*x*` / `_x_`                       | Trailing whitespace kept outside            |
//! |   code              | `` `x` ``                           |                                             |
//! |   strike / underline| `[.line-through]#x#` / `[.underline]#x#` |                                        |
//! |   subsup            | `~x~` / `^x^`                       |                                             |
//! |   link              | `link:`, `xref:`, `<<id,text>>`, `jira:KEY[]` | See `crate::common::links`        |
//!
//! # Lossy Conversions
//!
//! - Text colours, layouts and widths of block images are dropped
//! - Issue links lose their text, the issue macro renders its own
//! - Unknown nodes keep their text content but lose their structure

pub mod blocks;
pub mod inline;
pub mod list;
pub mod media;
pub mod serializer;
pub mod table;

use crate::context::Context;
use crate::ir::nodes::Node;
use serializer::render;

/// Converts a whole document: optional title, image directory attribute, then the body.
pub fn serialize_to_asciidoc<'a>(doc: &'a Node, title: Option<&str>, ctx: &mut Context<'a>) -> String {
    let mut out = String::new();
    if let Some(title) = title.map(str::trim).filter(|title| !title.is_empty()) {
        out.push_str(&format!("= {title}\n"));
    }
    out.push_str(&format!(":imagesdir: {}\n\n", ctx.options.images_dir));
    out.push_str(&render(doc, ctx, "").concat());
    out
}
