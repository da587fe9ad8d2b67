//! Block extension handlers.

use super::{macro_param, ExtensionHandler};
use crate::context::Context;
use crate::error::ExtensionError;
use crate::ir::nodes::Node;
use serde::Deserialize;

pub(super) fn standard() -> Vec<Box<dyn ExtensionHandler>> {
    vec![
        Box::new(TocHandler),
        Box::new(JqlSnapshotHandler),
        Box::new(ApprovalsReportHandler),
        Box::new(ChangeHistoryHandler),
    ]
}

/// `toc`: the AsciiDoc table of contents attribute.
pub struct TocHandler;

impl ExtensionHandler for TocHandler {
    fn key(&self) -> &str {
        "toc"
    }

    fn render(&self, _node: &Node, _ctx: &mut Context<'_>) -> Result<Vec<String>, ExtensionError> {
        Ok(vec!["\n:toc:\n".to_string()])
    }
}

/// `jira-jql-snapshot`: a saved issue query, rendered as a `jiraIssuesTable` block macro.
///
/// The macro stores its whole configuration as a JSON string in its `macroParams` parameter.
/// Only the first level is used.
pub struct JqlSnapshotHandler;

#[derive(Debug, Default, Deserialize)]
struct SnapshotParams {
    #[serde(default)]
    levels: Vec<SnapshotLevel>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotLevel {
    #[serde(default)]
    jql: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "fieldsPosition")]
    fields_position: Vec<FieldPosition>,
}

#[derive(Debug, Default, Deserialize)]
struct FieldPosition {
    #[serde(default)]
    available: bool,
    #[serde(default)]
    value: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
struct FieldValue {
    #[serde(default)]
    id: Option<String>,
}

impl ExtensionHandler for JqlSnapshotHandler {
    fn key(&self) -> &str {
        "jira-jql-snapshot"
    }

    fn render(&self, node: &Node, _ctx: &mut Context<'_>) -> Result<Vec<String>, ExtensionError> {
        let raw = macro_param(node, "macroParams")?;
        let params: SnapshotParams =
            serde_json::from_str(raw).map_err(|err| ExtensionError::InvalidParameter {
                name: "macroParams".to_string(),
                reason: err.to_string(),
            })?;

        let Some(level) = params.levels.first() else {
            return Ok(Vec::new());
        };

        let fields = level
            .fields_position
            .iter()
            .filter(|field| field.available)
            .filter_map(|field| field.value.as_ref()?.id.as_deref())
            .collect::<Vec<_>>()
            .join(",");

        let mut attributes = vec![
            quoted(&level.jql),
            format!("fields={}", quoted(&fields)),
        ];
        if let Some(title) = level.title.as_deref().filter(|t| !t.is_empty()) {
            attributes.push(format!("title={}", quoted(title)));
        }
        Ok(vec![format!("\njiraIssuesTable::[{}]\n", attributes.join(", "))])
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// `approvals-report`: lists the approvals of the current page, or of all pages.
pub struct ApprovalsReportHandler;

impl ExtensionHandler for ApprovalsReportHandler {
    fn key(&self) -> &str {
        "approvals-report"
    }

    fn render(&self, node: &Node, _ctx: &mut Context<'_>) -> Result<Vec<String>, ExtensionError> {
        let scope = match macro_param(node, "scope") {
            Ok("all") => "all",
            _ => "current",
        };
        Ok(vec![format!("\napprovalsReport::[scope={scope}]\n")])
    }
}

/// `change-history`: the page's change log.
pub struct ChangeHistoryHandler;

impl ExtensionHandler for ChangeHistoryHandler {
    fn key(&self) -> &str {
        "change-history"
    }

    fn render(&self, _node: &Node, _ctx: &mut Context<'_>) -> Result<Vec<String>, ExtensionError> {
        Ok(vec!["\nchangeLogTable::[]\n".to_string()])
    }
}
