use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::TemplateDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl DiagnosticLevel {
    /// Maps a metadata entry type such as `error` or `aws:cdk:warning`.
    /// Unknown types are informational.
    pub fn from_entry_type(entry_type: &str) -> Self {
        match entry_type
            .strip_prefix("aws:cdk:")
            .unwrap_or(entry_type)
            .to_ascii_lowercase()
            .as_str()
        {
            "error" => DiagnosticLevel::Error,
            "warning" | "warn" => DiagnosticLevel::Warning,
            _ => DiagnosticLevel::Info,
        }
    }
}

/// A message attached to a construct path during synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub path: String,
    pub level: DiagnosticLevel,
    pub message: String,
}

/// A synthesized stack: its desired template plus what synthesis reported.
#[derive(Debug, Clone, PartialEq)]
pub struct StackArtifact {
    pub stack_name: String,
    pub template: TemplateDocument,
    pub dependencies: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl StackArtifact {
    pub fn new(stack_name: impl Into<String>, template: TemplateDocument) -> Self {
        StackArtifact {
            stack_name: stack_name.into(),
            template,
            dependencies: vec![],
            diagnostics: vec![],
        }
    }

    pub fn with_dependencies(mut self, dependencies: &[&str]) -> Self {
        self.dependencies = dependencies.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_diagnostic(mut self, path: &str, level: DiagnosticLevel, message: &str) -> Self {
        self.diagnostics.push(Diagnostic {
            path: path.to_string(),
            level,
            message: message.to_string(),
        });
        self
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }
}

/// How the backend addresses a deployed stack: the stack name for top-level
/// stacks, the physical id for nested ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackIdentifier(String);

impl StackIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        StackIdentifier(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stack of a resolved current-vs-desired tree.
#[derive(Debug, Clone, PartialEq)]
pub struct StackNode {
    pub name: String,
    /// Absent when the stack cannot be located in the backend.
    pub identifier: Option<StackIdentifier>,
    pub current_template: Option<TemplateDocument>,
    pub desired_template: TemplateDocument,
    pub children: IndexMap<String, StackNode>,
}

impl StackNode {
    /// This node followed by all descendants, parents before children.
    pub fn pre_order(&self) -> Vec<&StackNode> {
        let mut nodes = vec![];
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            nodes.push(node);
            pending.extend(node.children.values().rev());
        }
        nodes
    }
}
