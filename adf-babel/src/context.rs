//! Conversion context.
//!
//!     A [`Context`] carries everything a renderer may consult besides the node itself. It is
//!     split in parts with different lifetimes:
//!
//!         - [`Scope`]: positional state (list depth, list kind, table cell). Renderers enter a
//!           sub-scope through [`Context::with_scope`], which restores the previous scope when the
//!           closure returns, so nesting can never be left unbalanced.
//!         - [`Shared`]: state that lives for the whole document and is visible from every
//!           sub-scope: registered anchors, collected mentions and the one-shot consumed marker.
//!         - [`RenderOptions`]: read-only inputs supplied by the caller.
//!
//!     One context is built per document conversion.

use crate::extensions::ExtensionRegistry;
use crate::ir::nodes::Node;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A page known to the converter, addressed by its page id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub title: String,
    /// Output path of the converted page, if it was converted.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// An attachment listed by the page it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Resolves the title of an arbitrary URL, used for inline cards outside the page mapping.
pub trait TitleResolver {
    fn resolve_title(&self, url: &str) -> Option<String>;
}

impl<F> TitleResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve_title(&self, url: &str) -> Option<String> {
        self(url)
    }
}

/// Read-only inputs of a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub page_mapping: HashMap<String, PageInfo>,
    /// Path of the file being written; cross-page links are made relative to its directory.
    pub current_file_path: PathBuf,
    /// Base URL of the wiki; links containing it are candidates for cross-page references.
    pub base_url: String,
    pub jira_base_url: Option<String>,
    pub images_dir: String,
    pub file_id_to_filename: HashMap<String, String>,
    pub media_files: Vec<MediaFile>,
    pub default_image_extension: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_mapping: HashMap::new(),
            current_file_path: PathBuf::new(),
            base_url: String::new(),
            jira_base_url: None,
            images_dir: "images".to_string(),
            file_id_to_filename: HashMap::new(),
            media_files: Vec::new(),
            default_image_extension: "png".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the issue tracker URL. An empty string leaves issue links unresolved.
    pub fn with_jira_base_url(mut self, jira_base_url: impl Into<String>) -> Self {
        let url = jira_base_url.into();
        self.jira_base_url = (!url.is_empty()).then_some(url);
        self
    }

    pub fn with_current_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.current_file_path = path.into();
        self
    }

    pub fn with_images_dir(mut self, images_dir: impl Into<String>) -> Self {
        self.images_dir = images_dir.into();
        self
    }

    pub fn with_page(mut self, page_id: impl Into<String>, page: PageInfo) -> Self {
        self.page_mapping.insert(page_id.into(), page);
        self
    }

    pub fn with_page_mapping(mut self, page_mapping: HashMap<String, PageInfo>) -> Self {
        self.page_mapping = page_mapping;
        self
    }

    pub fn with_attachment(mut self, file_id: impl Into<String>, filename: impl Into<String>) -> Self {
        self.file_id_to_filename.insert(file_id.into(), filename.into());
        self
    }

    pub fn with_attachments(mut self, file_id_to_filename: HashMap<String, String>) -> Self {
        self.file_id_to_filename = file_id_to_filename;
        self
    }

    pub fn with_media_files(mut self, media_files: Vec<MediaFile>) -> Self {
        self.media_files = media_files;
        self
    }

    pub fn with_default_image_extension(mut self, extension: impl Into<String>) -> Self {
        self.default_image_extension = extension.into();
        self
    }
}

/// Positional state, copied into sub-scopes.
///
/// A list item met outside any list is rendered as a bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub list_depth: usize,
    pub in_bullet_list: bool,
    pub in_table_cell: bool,
}

impl Default for Scope {
    fn default() -> Self {
        Self {
            list_depth: 0,
            in_bullet_list: true,
            in_table_cell: false,
        }
    }
}

/// Document-wide state, visible from every sub-scope.
#[derive(Debug, Default)]
pub struct Shared<'a> {
    anchors: Vec<String>,
    mention_username_to_id: HashMap<String, String>,
    consumed: Option<&'a Node>,
}

pub struct Context<'a> {
    pub scope: Scope,
    pub shared: Shared<'a>,
    pub options: RenderOptions,
    title_resolver: Option<&'a dyn TitleResolver>,
    extensions: &'a ExtensionRegistry,
}

impl<'a> Context<'a> {
    /// Builds a context with the standard extension handlers and no title resolver.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            scope: Scope::default(),
            shared: Shared::default(),
            options,
            title_resolver: None,
            extensions: ExtensionRegistry::standard(),
        }
    }

    pub fn with_title_resolver(mut self, resolver: &'a dyn TitleResolver) -> Self {
        self.title_resolver = Some(resolver);
        self
    }

    pub fn with_extensions(mut self, extensions: &'a ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn extensions(&self) -> &'a ExtensionRegistry {
        self.extensions
    }

    /// Runs `f` with `scope` in place, then restores the current scope.
    pub fn with_scope<R>(&mut self, scope: Scope, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.scope, scope);
        let result = f(self);
        self.scope = previous;
        result
    }

    pub fn register_anchor(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.shared.anchors.contains(&id) {
            self.shared.anchors.push(id);
        }
    }

    pub fn has_anchor(&self, id: &str) -> bool {
        self.shared.anchors.iter().any(|anchor| anchor == id)
    }

    /// Registered anchors in registration order.
    pub fn anchors(&self) -> &[String] {
        &self.shared.anchors
    }

    pub fn record_mention(&mut self, username: impl Into<String>, id: impl Into<String>) {
        self.shared
            .mention_username_to_id
            .insert(username.into(), id.into());
    }

    pub fn mentions(&self) -> &HashMap<String, String> {
        &self.shared.mention_username_to_id
    }

    pub fn take_mentions(&mut self) -> HashMap<String, String> {
        std::mem::take(&mut self.shared.mention_username_to_id)
    }

    /// Marks `node` so that the next time the dispatcher meets it, it renders nothing.
    pub fn consume(&mut self, node: &'a Node) {
        self.shared.consumed = Some(node);
    }

    /// Clears the consumed marker if it points at `node`, reporting whether it did.
    pub fn take_consumed(&mut self, node: &Node) -> bool {
        match self.shared.consumed {
            Some(consumed) if std::ptr::eq(consumed, node) => {
                self.shared.consumed = None;
                true
            }
            _ => false,
        }
    }

    pub fn resolve_title(&self, url: &str) -> Option<String> {
        self.title_resolver
            .and_then(|resolver| resolver.resolve_title(url))
    }
}
