//! Core data structures for the document tree.
//!
//! A [`Node`] mirrors one JSON object of an Atlassian Document Format tree. Every field
//! defaults when absent (or `null`) and unknown fields are ignored, so any JSON object
//! deserializes. The string `type` is interpreted through [`NodeKind`] and [`MarkKind`].

use crate::error::ConvertError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub node_type: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub attrs: Map<String, Value>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub content: Vec<Node>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub marks: Vec<Mark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A formatting annotation attached to a text node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub mark_type: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub attrs: Map<String, Value>,
}

/// The node types the renderer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Heading,
    Text,
    HardBreak,
    Rule,
    Table,
    TableRow,
    TableCell,
    TableHeader,
    Media,
    MediaSingle,
    MediaInline,
    MediaGroup,
    Caption,
    BulletList,
    OrderedList,
    ListItem,
    TaskList,
    TaskItem,
    CodeBlock,
    Panel,
    Extension,
    InlineExtension,
    Mention,
    InlineCard,
    Emoji,
    /// Any other `type`; the raw name stays available on [`Node::node_type`].
    Unknown,
}

impl NodeKind {
    pub fn from_type(node_type: &str) -> Self {
        match node_type {
            "doc" => NodeKind::Doc,
            "paragraph" => NodeKind::Paragraph,
            "heading" => NodeKind::Heading,
            "text" => NodeKind::Text,
            "hardBreak" => NodeKind::HardBreak,
            "rule" => NodeKind::Rule,
            "table" => NodeKind::Table,
            "tableRow" => NodeKind::TableRow,
            "tableCell" => NodeKind::TableCell,
            "tableHeader" => NodeKind::TableHeader,
            "media" => NodeKind::Media,
            "mediaSingle" => NodeKind::MediaSingle,
            "mediaInline" => NodeKind::MediaInline,
            "mediaGroup" => NodeKind::MediaGroup,
            "caption" => NodeKind::Caption,
            "bulletList" => NodeKind::BulletList,
            "orderedList" => NodeKind::OrderedList,
            "listItem" => NodeKind::ListItem,
            "taskList" => NodeKind::TaskList,
            "taskItem" => NodeKind::TaskItem,
            "codeBlock" => NodeKind::CodeBlock,
            "panel" => NodeKind::Panel,
            "extension" | "bodiedExtension" => NodeKind::Extension,
            "inlineExtension" => NodeKind::InlineExtension,
            "mention" => NodeKind::Mention,
            "inlineCard" => NodeKind::InlineCard,
            "emoji" => NodeKind::Emoji,
            _ => NodeKind::Unknown,
        }
    }

    /// Lists are the only blocks that may nest inside a list item.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            NodeKind::BulletList | NodeKind::OrderedList | NodeKind::TaskList
        )
    }
}

/// The inline formatting marks the renderer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    Strong,
    Em,
    Code,
    Strike,
    Underline,
    Sub,
    Sup,
    Link,
    Other,
}

impl Node {
    /// Parses a node from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConvertError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Interprets an already parsed JSON value as a node.
    pub fn from_value(value: Value) -> Result<Self, ConvertError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from_type(&self.node_type)
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// Reads a numeric attribute, accepting integers written as floats or strings.
    pub fn attr_u64(&self, key: &str) -> Option<u64> {
        match self.attrs.get(key)? {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The raw `text` of a text node, empty for everything else.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Concatenates the raw text of this node and all its descendants, ignoring marks.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.content {
            child.collect_text(out);
        }
    }
}

impl Mark {
    pub fn kind(&self) -> MarkKind {
        match self.mark_type.as_str() {
            "strong" => MarkKind::Strong,
            "em" => MarkKind::Em,
            "code" => MarkKind::Code,
            "strike" => MarkKind::Strike,
            "underline" => MarkKind::Underline,
            "subsup" => match self.attr_str("type") {
                Some("sub") => MarkKind::Sub,
                Some("sup") => MarkKind::Sup,
                _ => MarkKind::Other,
            },
            "link" => MarkKind::Link,
            _ => MarkKind::Other,
        }
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
