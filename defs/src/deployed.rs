use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::TemplateDocument;

/// Snapshot of what is deployed, keyed by stack identifier (stack name for
/// top-level stacks, physical id for nested stacks).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployedState {
    #[serde(default)]
    pub stacks: IndexMap<String, DeployedStack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedStack {
    pub template: TemplateDocument,
    #[serde(default)]
    pub change_set: bool,
    /// Resource summaries of nested stacks: logical id -> physical id
    #[serde(default)]
    pub nested_stacks: IndexMap<String, String>,
}

impl DeployedStack {
    pub fn new(template: TemplateDocument) -> Self {
        DeployedStack {
            template,
            change_set: false,
            nested_stacks: IndexMap::new(),
        }
    }

    pub fn with_change_set(mut self) -> Self {
        self.change_set = true;
        self
    }

    pub fn with_nested_stack(mut self, logical_id: &str, physical_id: &str) -> Self {
        self.nested_stacks
            .insert(logical_id.to_string(), physical_id.to_string());
        self
    }
}

impl DeployedState {
    pub fn with_stack(mut self, identifier: &str, stack: DeployedStack) -> Self {
        self.stacks.insert(identifier.to_string(), stack);
        self
    }
}
