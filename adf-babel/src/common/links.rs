//! Link resolution.
//!
//! A link mark's `href` is classified once into a [`LinkTarget`], in priority order:
//!
//! 1. `#id` where `id` is an anchor already registered in this document: same-page reference.
//! 2. A wiki URL (contains the configured base URL) whose page id is in the page mapping:
//!    cross-page `xref:` relative to the file being written, keeping any fragment. A wiki URL
//!    with a fragment that cannot be mapped stays an external link.
//! 3. An issue tracker URL (`/browse/KEY-123` under the configured tracker URL): issue macro.
//! 4. Anything else: external `link:` macro.
//!
//! Link text keeps its formatting. When the formatted text is wrapped in exactly one `*` or
//! `_` pair, the macro is placed inside the wrapper (`*link:href[text]*`) since AsciiDoc does
//! not parse constrained formatting inside macro brackets reliably.

use crate::context::Context;
use crate::ir::nodes::{MarkKind, Node, NodeKind};
use once_cell::sync::Lazy;
use pathdiff::diff_paths;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use url::Url;

static ISSUE_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/browse/([A-Z]+-[0-9]+)").expect("valid issue key pattern"));

/// Where a link points to, after resolution against the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Anchor(String),
    Page {
        path: String,
        fragment: Option<String>,
    },
    Issue(String),
    External(String),
}

impl LinkTarget {
    /// Renders the macro for this target around already formatted `text`.
    fn macro_for(&self, text: &str) -> String {
        match self {
            LinkTarget::Anchor(id) => format!("<<{id},{text}>>"),
            LinkTarget::Page {
                path,
                fragment: Some(fragment),
            } => format!("xref:{path}#{fragment}[{text}]"),
            LinkTarget::Page {
                path,
                fragment: None,
            } => format!("xref:{path}[{text}]"),
            LinkTarget::Issue(key) => format!("jira:{key}[]"),
            LinkTarget::External(href) => format!("link:{href}[{text}]"),
        }
    }
}

pub fn classify(href: &str, ctx: &Context<'_>) -> LinkTarget {
    if let Some(id) = href.strip_prefix('#') {
        if ctx.has_anchor(id) {
            return LinkTarget::Anchor(id.to_string());
        }
    }

    let base_url = ctx.options.base_url.as_str();
    if !base_url.is_empty() {
        if let Some((page_url, fragment)) = href.split_once('#') {
            if page_url.contains(base_url) {
                return match mapped_page_path(page_url, ctx) {
                    Some(path) => LinkTarget::Page {
                        path,
                        fragment: Some(fragment.to_string()),
                    },
                    None => {
                        log::debug!("cross-page link to unmapped page: {href}");
                        LinkTarget::External(href.to_string())
                    }
                };
            }
        } else if href.contains(base_url) {
            if let Some(path) = mapped_page_path(href, ctx) {
                return LinkTarget::Page {
                    path,
                    fragment: None,
                };
            }
        }
    }

    if let Some(key) = issue_key(href, ctx.options.jira_base_url.as_deref()) {
        return LinkTarget::Issue(key);
    }

    LinkTarget::External(href.to_string())
}

/// Renders a link to `href` around `text`, which may already carry formatting.
pub fn render_link(href: &str, text: &str, ctx: &Context<'_>) -> String {
    let target = classify(href, ctx);
    if let LinkTarget::Issue(_) = target {
        return target.macro_for(text);
    }
    match single_wrapper(text) {
        Some((wrapper, inner)) => format!("{wrapper}{}{wrapper}", target.macro_for(inner)),
        None => target.macro_for(text),
    }
}

/// Returns the wrapper and inner text if `text` is wholly surrounded by one `*` or `_` pair.
fn single_wrapper(text: &str) -> Option<(char, &str)> {
    ['*', '_'].into_iter().find_map(|wrapper| {
        let inner = text.strip_prefix(wrapper)?.strip_suffix(wrapper)?;
        (!inner.is_empty() && !inner.contains(wrapper)).then_some((wrapper, inner))
    })
}

fn issue_key(href: &str, jira_base_url: Option<&str>) -> Option<String> {
    let jira_base_url = jira_base_url.filter(|url| !url.is_empty())?;
    if !href.contains(jira_base_url) {
        return None;
    }
    ISSUE_KEY
        .captures(href)
        .and_then(|captures| captures.get(1))
        .map(|key| key.as_str().to_string())
}

fn mapped_page_path(url: &str, ctx: &Context<'_>) -> Option<String> {
    let page_id = extract_page_id(url)?;
    let page = ctx.options.page_mapping.get(&page_id)?;
    let target = page.path.as_deref()?;
    Some(relative_path(target, &ctx.options.current_file_path))
}

/// Extracts a page id from a wiki URL.
///
/// Looks at the `pageId` query parameter first, then a numeric path segment following
/// `pages`, then a numeric segment following `pages/viewpage.action`.
pub fn extract_page_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse("http://localhost/").and_then(|base| base.join(url)))
        .ok()?;

    if let Some((_, id)) = parsed.query_pairs().find(|(key, _)| key == "pageId") {
        if !id.is_empty() {
            return Some(id.into_owned());
        }
    }

    let segments: Vec<&str> = parsed.path_segments()?.collect();
    let is_numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    segments
        .windows(2)
        .find(|pair| pair[0] == "pages" && is_numeric(pair[1]))
        .map(|pair| pair[1].to_string())
        .or_else(|| {
            segments
                .windows(3)
                .find(|w| w[0] == "pages" && w[1] == "viewpage.action" && is_numeric(w[2]))
                .map(|w| w[2].to_string())
        })
}

/// Path of `target` relative to the directory containing `current_file`, with forward slashes.
pub fn relative_path(target: &Path, current_file: &Path) -> String {
    let current_dir = current_file.parent().unwrap_or_else(|| Path::new(""));
    let relative = diff_paths(target, current_dir).unwrap_or_else(|| target.to_path_buf());
    relative.to_string_lossy().replace('\\', "/")
}

/// Collects the ids of wiki pages referenced from `node`, by link marks and inline cards.
pub fn linked_page_ids(node: &Node, base_url: &str) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    if !base_url.is_empty() {
        collect_page_ids(node, base_url, &mut ids);
    }
    ids
}

fn collect_page_ids(node: &Node, base_url: &str, ids: &mut BTreeSet<String>) {
    let mut consider = |url: &str| {
        if url.contains(base_url) {
            if let Some(id) = extract_page_id(url) {
                ids.insert(id);
            }
        }
    };

    for mark in node.marks.iter().filter(|m| m.kind() == MarkKind::Link) {
        if let Some(href) = mark.attr_str("href") {
            consider(href);
        }
    }
    if node.kind() == NodeKind::InlineCard {
        if let Some(url) = node.attr_str("url") {
            consider(url);
        }
    }

    for child in &node.content {
        collect_page_ids(child, base_url, ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{PageInfo, RenderOptions};
    use serde_json::json;
    use std::path::PathBuf;

    const BASE: &str = "https://wiki.example.com";

    fn options() -> RenderOptions {
        RenderOptions::new()
            .with_base_url(BASE)
            .with_jira_base_url("https://jira.example.com")
            .with_current_file_path("out/Parent.adoc")
            .with_page(
                "12345",
                PageInfo {
                    title: "Child".into(),
                    path: Some(PathBuf::from("out/child/Child.adoc")),
                },
            )
    }

    #[test]
    fn test_extract_page_id_variants() {
        assert_eq!(
            extract_page_id("https://wiki.example.com/pages/viewpage.action?pageId=987"),
            Some("987".to_string())
        );
        assert_eq!(
            extract_page_id("https://wiki.example.com/wiki/spaces/DOC/pages/12345/Child+Page"),
            Some("12345".to_string())
        );
        assert_eq!(
            extract_page_id("https://wiki.example.com/wiki/pages/viewpage.action/555"),
            Some("555".to_string())
        );
        assert_eq!(
            extract_page_id("/wiki/spaces/DOC/pages/777"),
            Some("777".to_string())
        );
        assert_eq!(extract_page_id("https://wiki.example.com/wiki/spaces/DOC"), None);
    }

    #[test]
    fn test_same_page_anchor_requires_registration() {
        let mut ctx = Context::new(options());
        assert_eq!(
            render_link("#intro", "Intro", &ctx),
            "link:#intro[Intro]"
        );
        ctx.register_anchor("intro");
        assert_eq!(render_link("#intro", "Intro", &ctx), "<<intro,Intro>>");
    }

    #[test]
    fn test_cross_page_links() {
        let ctx = Context::new(options());
        assert_eq!(
            render_link(
                "https://wiki.example.com/wiki/spaces/DOC/pages/12345/Child#Setup",
                "setup",
                &ctx
            ),
            "xref:child/Child.adoc#Setup[setup]"
        );
        assert_eq!(
            render_link("https://wiki.example.com/wiki/spaces/DOC/pages/12345", "child", &ctx),
            "xref:child/Child.adoc[child]"
        );
        assert_eq!(
            render_link("https://wiki.example.com/wiki/spaces/DOC/pages/999#Top", "x", &ctx),
            "link:https://wiki.example.com/wiki/spaces/DOC/pages/999#Top[x]"
        );
    }

    #[test]
    fn test_issue_links_drop_text() {
        let ctx = Context::new(options());
        assert_eq!(
            render_link("https://jira.example.com/browse/TEST-123", "*See issue*", &ctx),
            "jira:TEST-123[]"
        );
        assert_eq!(
            render_link("https://jira.example.com/projects/TEST", "board", &ctx),
            "link:https://jira.example.com/projects/TEST[board]"
        );
    }

    #[test]
    fn test_issue_links_need_configured_tracker() {
        let ctx = Context::new(RenderOptions::new());
        assert_eq!(
            render_link("https://jira.example.com/browse/TEST-1", "issue", &ctx),
            "link:https://jira.example.com/browse/TEST-1[issue]"
        );
    }

    #[test]
    fn test_link_nests_inside_single_wrapper() {
        let ctx = Context::new(RenderOptions::new());
        assert_eq!(
            render_link("https://ada.com", "*Ada*", &ctx),
            "*link:https://ada.com[Ada]*"
        );
        assert_eq!(
            render_link("https://ada.com", "_Ada_", &ctx),
            "_link:https://ada.com[Ada]_"
        );
        assert_eq!(
            render_link("https://ada.com", "`Ada`", &ctx),
            "link:https://ada.com[`Ada`]"
        );
        assert_eq!(
            render_link("https://ada.com", "Ada website", &ctx),
            "link:https://ada.com[Ada website]"
        );
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("out/a/b.adoc"), Path::new("out/c/d.adoc")),
            "../a/b.adoc"
        );
        assert_eq!(
            relative_path(Path::new("b.adoc"), Path::new("a.adoc")),
            "b.adoc"
        );
    }

    #[test]
    fn test_linked_page_ids() {
        let doc = Node::from_value(json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "a", "marks": [
                        {"type": "link", "attrs": {"href": "https://wiki.example.com/pages/12/A"}}
                    ]},
                    {"type": "inlineCard", "attrs": {"url": "https://wiki.example.com/x?pageId=34"}},
                    {"type": "text", "text": "b", "marks": [
                        {"type": "link", "attrs": {"href": "https://elsewhere.test/pages/56"}}
                    ]}
                ]}
            ]
        }))
        .unwrap();
        let ids: Vec<String> = linked_page_ids(&doc, BASE).into_iter().collect();
        assert_eq!(ids, vec!["12".to_string(), "34".to_string()]);
        assert!(linked_page_ids(&doc, "").is_empty());
    }
}
