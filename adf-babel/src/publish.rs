//! Document publishing pipeline.
//!
//! Provides a high-level API for converting a document tree to AsciiDoc in one call, returning
//! the text or writing it to disk. The caller gets back the mentions collected on the way, to
//! resolve user ids against its own directory.
//!
//! For more control over the conversion (a title resolver, custom extension handlers), build
//! a [`Context`] and call [`serialize_to_asciidoc`] directly.

use crate::context::{Context, RenderOptions};
use crate::error::ConvertError;
use crate::formats::asciidoc::serialize_to_asciidoc;
use crate::ir::nodes::Node;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Specifies how to publish a document.
///
/// ```ignore
/// let spec = PublishSpec::new(&document)
///     .with_title("Release Notes")
///     .with_output_path("docs/release-notes.adoc");
/// ```
///
/// Without an output path the AsciiDoc text is returned in memory.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    /// The parsed document tree to convert.
    pub document: &'a Node,
    /// Document title, emitted as the level-0 heading.
    pub title: Option<String>,
    /// Optional file path for writing output.
    pub output: Option<PathBuf>,
    pub options: RenderOptions,
}

impl<'a> PublishSpec<'a> {
    pub fn new(document: &'a Node) -> Self {
        Self {
            document,
            title: None,
            output: None,
            options: RenderOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the output file path. If provided, content is written to disk and cross-page
    /// links are made relative to it unless the options name another current file.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Content held in memory (no output path was given).
    InMemory(String),
    /// Path to the written file.
    File(PathBuf),
}

/// Result of a publish operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
    /// Mentioned users, display name to account id.
    pub mentions: HashMap<String, String>,
}

/// Publishes a document as described by a [`PublishSpec`].
///
/// # Errors
///
/// Returns [`ConvertError::Io`] if the output file cannot be written.
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, ConvertError> {
    let mut options = spec.options;
    if options.current_file_path.as_os_str().is_empty() {
        if let Some(output) = &spec.output {
            options.current_file_path = output.clone();
        }
    }

    let mut ctx = Context::new(options);
    let text = serialize_to_asciidoc(spec.document, spec.title.as_deref(), &mut ctx);
    let mentions = ctx.take_mentions();

    let artifact = match spec.output {
        Some(path) => PublishArtifact::File(write_to_path(path, &text)?),
        None => PublishArtifact::InMemory(text),
    };
    Ok(PublishResult { artifact, mentions })
}

fn write_to_path(path: PathBuf, text: &str) -> Result<PathBuf, ConvertError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ConvertError::Io(err.to_string()))?;
    }
    fs::write(&path, text)
        .map(|_| path.clone())
        .map_err(|err| ConvertError::Io(format!("{}: {err}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PageInfo;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_document() -> Node {
        Node::from_value(json!({
            "type": "doc",
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "Ask "},
                {"type": "mention", "attrs": {"id": "u-1", "text": "@Ada"}},
                {"type": "text", "text": " or read "},
                {"type": "text", "text": "the guide", "marks": [
                    {"type": "link", "attrs": {"href": "https://wiki.test/pages/7"}}
                ]}
            ]}]
        }))
        .unwrap()
    }

    #[test]
    fn publishes_to_memory_when_no_output_path() {
        let doc = sample_document();
        let result = publish(PublishSpec::new(&doc).with_title("Help")).expect("publish");
        match result.artifact {
            PublishArtifact::InMemory(content) => {
                assert!(content.starts_with("= Help\n:imagesdir: images\n\n"));
                assert!(content.contains("Ask @Ada or read"));
            }
            PublishArtifact::File(_) => panic!("expected in-memory artifact"),
        }
        assert_eq!(result.mentions.get("Ada").map(String::as_str), Some("u-1"));
    }

    #[test]
    fn writes_to_disk_relative_to_output_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("space").join("Home.adoc");
        let doc = sample_document();
        let options = RenderOptions::new().with_base_url("https://wiki.test").with_page(
            "7",
            PageInfo {
                title: "Guide".into(),
                path: Some(dir.path().join("space").join("guide").join("Guide.adoc")),
            },
        );
        let result = publish(
            PublishSpec::new(&doc)
                .with_output_path(&path)
                .with_options(options),
        )
        .expect("publish");
        match result.artifact {
            PublishArtifact::File(p) => assert_eq!(p, path),
            PublishArtifact::InMemory(_) => panic!("expected file artifact"),
        }
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("xref:guide/Guide.adoc[the guide]"));
    }
}
