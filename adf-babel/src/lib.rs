//! Conversion of Atlassian Document Format trees to AsciiDoc
//!
//!     This crate turns the JSON document trees stored by Confluence (ADF) into AsciiDoc, and
//!     offers the two rewrite passes needed before a tree goes back to the wiki: swapping
//!     attachment file names for attachment ids, and clamping image widths.
//!
//!     This is a pure lib, that is, it powers the adf-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it printing, env vars or network access. Page
//!     titles and attachment names come in through the RenderOptions and the TitleResolver trait.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── context.rs              # Scope, shared state and options of a conversion
//!     ├── ir
//!     │   └── nodes.rs            # Node, Mark and their kinds
//!     ├── formats
//!     │   └── asciidoc
//!     │       ├── serializer.rs   # Node dispatch
//!     │       ├── inline.rs       # Text, marks, mentions, cards
//!     │       ├── blocks.rs       # Paragraphs, headings, code, panels
//!     │       ├── list.rs
//!     │       ├── table.rs
//!     │       └── media.rs
//!     ├── common
//!     │   └── links.rs            # Link classification and page ids
//!     ├── extensions              # Macro handlers and their registry
//!     ├── transforms.rs           # JSON rewrite passes
//!     └── publish.rs
//!
//! Testing
//!     tests
//!     └── <area>
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     Rendering is a depth-first walk returning string fragments. Positional state (list depth,
//!     table cells) lives in a Scope that is swapped in and restored around each nested
//!     construct, while anchors and mentions accumulate in state shared by the whole walk. Links
//!     are resolved in priority order: same-page anchors, mapped wiki pages, issue keys, and
//!     finally plain external links.
//!
pub mod context;
pub mod error;
pub mod extensions;
pub mod formats;
pub mod publish;
pub mod transforms;

pub mod common;
pub mod ir;

pub use common::links::linked_page_ids;
pub use context::{Context, MediaFile, PageInfo, RenderOptions, TitleResolver};
pub use error::{ConvertError, ExtensionError};
pub use ir::nodes::Node;
pub use transforms::{clamp_widths, substitute_ids, to_pretty_json};

/// Converts a document with the standard extension handlers and no title resolver.
pub fn to_asciidoc(doc: &Node, title: Option<&str>, options: RenderOptions) -> String {
    let mut ctx = Context::new(options);
    formats::asciidoc::serialize_to_asciidoc(doc, title, &mut ctx)
}
