//! Inline extension handlers.

use super::{macro_param, ExtensionHandler};
use crate::context::Context;
use crate::error::ExtensionError;
use crate::ir::nodes::Node;

/// Workflow labels and the document attribute each one is published under.
const WORKFLOW_ATTRIBUTES: &[(&str, &str)] = &[
    ("Document Owner", "owner"),
    ("Approved Version", "approved-version"),
    ("Approval Date", "approval-date"),
    ("Expiry Date", "expiry-date"),
    ("Current State", "state"),
    ("Approvers", "approvers"),
];

pub(super) fn standard() -> Vec<Box<dyn ExtensionHandler>> {
    vec![
        Box::new(AnchorHandler),
        Box::new(WorkflowMetadataHandler),
        Box::new(JiraIssueHandler),
    ]
}

/// `anchor`: an inline anchor, made available to later same-page links.
pub struct AnchorHandler;

impl ExtensionHandler for AnchorHandler {
    fn key(&self) -> &str {
        "anchor"
    }

    fn render(&self, node: &Node, ctx: &mut Context<'_>) -> Result<Vec<String>, ExtensionError> {
        let id = macro_param(node, "")?.trim();
        if id.is_empty() {
            return Err(ExtensionError::InvalidParameter {
                name: "(unnamed)".to_string(),
                reason: "empty anchor name".to_string(),
            });
        }
        ctx.register_anchor(id);
        Ok(vec![format!("[[{id}]]")])
    }
}

/// `workflow-metadata`: a workflow field, rendered as an attribute reference.
pub struct WorkflowMetadataHandler;

impl ExtensionHandler for WorkflowMetadataHandler {
    fn key(&self) -> &str {
        "workflow-metadata"
    }

    fn render(&self, node: &Node, _ctx: &mut Context<'_>) -> Result<Vec<String>, ExtensionError> {
        let label = macro_param(node, "")?.trim();
        let attribute = WORKFLOW_ATTRIBUTES
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, attribute)| *attribute);
        match attribute {
            Some(attribute) => Ok(vec![format!("{{workflow-{attribute}}}")]),
            None => {
                log::debug!("unmapped workflow metadata label: {label}");
                Ok(vec![format!("\n// Unmapped workflow metadata: {label}\n")])
            }
        }
    }
}

/// `jira`: a single issue reference.
pub struct JiraIssueHandler;

impl ExtensionHandler for JiraIssueHandler {
    fn key(&self) -> &str {
        "jira"
    }

    fn render(&self, node: &Node, _ctx: &mut Context<'_>) -> Result<Vec<String>, ExtensionError> {
        let key = macro_param(node, "key")?.trim();
        Ok(vec![format!("jira:{key}[]")])
    }
}
