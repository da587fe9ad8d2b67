//! Extension (macro) handling
//!
//! Confluence stores its macros as `extension`, `bodiedExtension` and `inlineExtension` nodes,
//! identified by `attrs.extensionKey` and carrying their settings under
//! `attrs.parameters.macroParams.<name>.value`. Each supported macro has an
//! [`ExtensionHandler`] that turns the node into AsciiDoc fragments.
//!
//! # Architecture
//!
//! *   **`ExtensionHandler` trait**: renders one macro, failing with an [`ExtensionError`] when
//!     its parameters cannot be read.
//! *   **`ExtensionRegistry`**: maps extension keys to handlers, with separate tables for block
//!     and inline extensions since the same key may mean different things in both positions.
//!
//! The registry never lets a handler failure escape: it logs a warning and emits an AsciiDoc
//! comment in place of the macro. Keys without a handler render their body, if any.
//!
//! # Standard Handlers
//!
//! Block: `toc`, `jira-jql-snapshot`, `approvals-report`, `change-history`.
//! Inline: `anchor`, `workflow-metadata`, `jira`.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut registry = ExtensionRegistry::default_with_standard();
//! registry.register_block("status-report", Box::new(StatusReportHandler));
//! let ctx = Context::new(options).with_extensions(&registry);
//! ```

use crate::context::Context;
use crate::error::ExtensionError;
use crate::formats::asciidoc::serializer::render_children;
use crate::ir::nodes::Node;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod block;
pub mod inline;

static STANDARD: Lazy<ExtensionRegistry> = Lazy::new(ExtensionRegistry::default_with_standard);

/// A handler for one extension key.
pub trait ExtensionHandler: Send + Sync {
    /// Returns the extension key this handler supports (e.g., "toc").
    fn key(&self) -> &str;

    /// Renders the extension node into output fragments.
    fn render(&self, node: &Node, ctx: &mut Context<'_>) -> Result<Vec<String>, ExtensionError>;
}

/// A registry for extension handlers.
pub struct ExtensionRegistry {
    block: HashMap<String, Box<dyn ExtensionHandler>>,
    inline: HashMap<String, Box<dyn ExtensionHandler>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self {
            block: HashMap::new(),
            inline: HashMap::new(),
        }
    }

    /// Creates a registry with the standard handlers pre-registered.
    pub fn default_with_standard() -> Self {
        let mut registry = Self::new();
        for handler in block::standard() {
            registry.register_block(handler);
        }
        for handler in inline::standard() {
            registry.register_inline(handler);
        }
        registry
    }

    /// The shared registry of standard handlers used when a context is given no other.
    pub fn standard() -> &'static ExtensionRegistry {
        &STANDARD
    }

    pub fn register_block(&mut self, handler: Box<dyn ExtensionHandler>) {
        self.block.insert(handler.key().to_string(), handler);
    }

    pub fn register_inline(&mut self, handler: Box<dyn ExtensionHandler>) {
        self.inline.insert(handler.key().to_string(), handler);
    }

    pub fn block(&self, key: &str) -> Option<&dyn ExtensionHandler> {
        self.block.get(key).map(|handler| handler.as_ref())
    }

    pub fn inline(&self, key: &str) -> Option<&dyn ExtensionHandler> {
        self.inline.get(key).map(|handler| handler.as_ref())
    }

    pub fn render_block<'a>(&self, node: &'a Node, ctx: &mut Context<'a>) -> Vec<String> {
        dispatch(self.block(extension_key(node)), "block", node, ctx)
    }

    pub fn render_inline<'a>(&self, node: &'a Node, ctx: &mut Context<'a>) -> Vec<String> {
        dispatch(self.inline(extension_key(node)), "inline", node, ctx)
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn extension_key(node: &Node) -> &str {
    node.attr_str("extensionKey").unwrap_or("")
}

fn dispatch<'a>(
    handler: Option<&dyn ExtensionHandler>,
    position: &str,
    node: &'a Node,
    ctx: &mut Context<'a>,
) -> Vec<String> {
    let key = extension_key(node);
    match handler {
        Some(handler) => handler.render(node, ctx).unwrap_or_else(|err| {
            log::warn!("{position} extension '{key}' failed: {err}");
            vec![format!("\n// Error processing {key} macro: {err}\n")]
        }),
        None => {
            log::debug!("no handler for {position} extension '{key}'");
            render_children(node, ctx, "")
        }
    }
}

/// Reads `attrs.parameters.macroParams.<name>.value` as a string.
///
/// The unnamed parameter of a macro is stored under the empty name.
pub fn macro_param<'n>(node: &'n Node, name: &str) -> Result<&'n str, ExtensionError> {
    node.attr("parameters")
        .and_then(|parameters| parameters.get("macroParams"))
        .and_then(|params| params.get(name))
        .and_then(|param| param.get("value"))
        .and_then(|value| value.as_str())
        .ok_or_else(|| ExtensionError::MissingParameter(display_name(name).to_string()))
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed)"
    } else {
        name
    }
}
