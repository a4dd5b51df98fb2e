use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DiagnosticLevel, TemplateDocument};

/// `manifest.json` at the root of a cloud assembly directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssemblyManifest {
    #[serde(default)]
    pub stacks: Vec<StackManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackManifest {
    pub stack_name: String,
    /// Path relative to the assembly directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateDocument>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Construct path -> entries reported for it during synthesis
    #[serde(default)]
    pub metadata: IndexMap<String, Vec<MetadataEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub data: Value,
}

impl MetadataEntry {
    pub fn level(&self) -> DiagnosticLevel {
        DiagnosticLevel::from_entry_type(&self.entry_type)
    }

    pub fn message(&self) -> String {
        match &self.data {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
