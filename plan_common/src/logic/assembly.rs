use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use log::{debug, info};
use plan_defs::{
    errors::AssemblyError, AssemblyManifest, AssemblySource, Diagnostic, StackArtifact,
    StackManifest, TemplateDocument,
};
use plan_utils::{read_document, read_template_file};

pub const MANIFEST_FILE: &str = "manifest.json";

/// The synthesized stacks of one application, with the nested templates they
/// reference.
#[derive(Debug, Clone, Default)]
pub struct CloudAssembly {
    directory: Option<PathBuf>,
    stacks: Vec<StackArtifact>,
    nested_templates: HashMap<String, TemplateDocument>,
}

impl CloudAssembly {
    pub fn new(stacks: Vec<StackArtifact>) -> Result<Self, AssemblyError> {
        validate_dependencies(&stacks)?;
        Ok(CloudAssembly {
            directory: None,
            stacks,
            nested_templates: HashMap::new(),
        })
    }

    /// Registers a nested stack template under the locator its parent's
    /// asset path metadata refers to.
    pub fn with_nested_template(mut self, locator: &str, template: TemplateDocument) -> Self {
        self.nested_templates.insert(locator.to_string(), template);
        self
    }

    /// Loads `manifest.json` and the stack templates it lists. Nested
    /// templates are read lazily, relative to `directory`.
    pub fn from_directory(directory: &Path) -> Result<Self, AssemblyError> {
        let manifest_path = directory.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(AssemblyError::ManifestMissing(
                manifest_path.display().to_string(),
            ));
        }

        let manifest: AssemblyManifest = read_document(&manifest_path)?;
        info!(
            "Read cloud assembly with {} stack(s) from {}",
            manifest.stacks.len(),
            directory.display()
        );

        let stacks = manifest
            .stacks
            .into_iter()
            .map(|stack| load_stack(directory, stack))
            .collect::<Result<Vec<_>, _>>()?;

        let mut assembly = CloudAssembly::new(stacks)?;
        assembly.directory = Some(directory.to_path_buf());
        Ok(assembly)
    }
}

impl AssemblySource for CloudAssembly {
    fn stacks(&self) -> &[StackArtifact] {
        &self.stacks
    }

    fn load_nested_template(&self, locator: &str) -> Result<TemplateDocument, anyhow::Error> {
        if let Some(template) = self.nested_templates.get(locator) {
            return Ok(template.clone());
        }
        match &self.directory {
            Some(directory) => {
                let path = directory.join(locator);
                debug!("Reading nested template {}", path.display());
                Ok(read_template_file(&path)?)
            }
            None => Err(anyhow!(
                "Nested template {} is not part of the assembly",
                locator
            )),
        }
    }
}

fn load_stack(directory: &Path, stack: StackManifest) -> Result<StackArtifact, AssemblyError> {
    let template = match (stack.template, &stack.template_file) {
        (Some(template), _) => template,
        (None, Some(file)) => read_template_file(&directory.join(file))?,
        (None, None) => return Err(AssemblyError::MissingTemplate(stack.stack_name)),
    };

    let diagnostics = stack
        .metadata
        .iter()
        .flat_map(|(path, entries)| {
            entries.iter().map(move |entry| Diagnostic {
                path: path.clone(),
                level: entry.level(),
                message: entry.message(),
            })
        })
        .collect();

    Ok(StackArtifact {
        stack_name: stack.stack_name,
        template,
        dependencies: stack.dependencies,
        diagnostics,
    })
}

fn validate_dependencies(stacks: &[StackArtifact]) -> Result<(), AssemblyError> {
    let names: HashSet<&str> = stacks.iter().map(|s| s.stack_name.as_str()).collect();
    for stack in stacks {
        if let Some(unknown) = stack
            .dependencies
            .iter()
            .find(|dep| !names.contains(dep.as_str()))
        {
            return Err(AssemblyError::UnknownDependency(
                stack.stack_name.clone(),
                unknown.clone(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_defs::DiagnosticLevel;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_unknown_dependency_is_rejected() {
        let result = CloudAssembly::new(vec![
            StackArtifact::new("A", TemplateDocument::empty()).with_dependencies(&["Ghost"])
        ]);

        match result {
            Err(AssemblyError::UnknownDependency(stack, dep)) => {
                assert_eq!(stack, "A");
                assert_eq!(dep, "Ghost");
            }
            other => panic!("expected unknown dependency, got {:?}", other),
        }
    }

    #[test]
    fn test_in_memory_nested_template() {
        let child: TemplateDocument = json!({"Resources": {}}).into();
        let assembly = CloudAssembly::new(vec![])
            .unwrap()
            .with_nested_template("child.json", child.clone());

        assert_eq!(assembly.load_nested_template("child.json").unwrap(), child);
        assert!(assembly.load_nested_template("other.json").is_err());
    }

    #[test]
    fn test_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            json!({
                "stacks": [
                    {"stackName": "A", "template": {"resource": "A"}},
                    {
                        "stackName": "B",
                        "templateFile": "B.template.json",
                        "dependencies": ["A"],
                        "metadata": {
                            "/B/Resource": [
                                {"type": "aws:cdk:warning", "data": "careful"},
                                {"type": "aws:cdk:logicalId", "data": "Resource"}
                            ]
                        }
                    }
                ]
            })
            .to_string(),
        )
        .unwrap();
        fs::write(dir.path().join("B.template.json"), r#"{"resource": "B"}"#).unwrap();
        fs::write(dir.path().join("child.template.json"), r#"{"x": 1}"#).unwrap();

        let assembly = CloudAssembly::from_directory(dir.path()).unwrap();

        let names: Vec<&str> = assembly
            .stacks()
            .iter()
            .map(|s| s.stack_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);

        let b = &assembly.stacks()[1];
        assert_eq!(b.template, TemplateDocument::from(json!({"resource": "B"})));
        assert_eq!(b.dependencies, vec!["A".to_string()]);
        assert_eq!(b.diagnostics.len(), 2);
        assert_eq!(b.diagnostics[0].level, DiagnosticLevel::Warning);
        assert_eq!(b.diagnostics[0].message, "careful");
        assert_eq!(b.diagnostics[0].path, "/B/Resource");
        assert!(!b.has_errors());

        assert_eq!(
            assembly
                .load_nested_template("child.template.json")
                .unwrap(),
            TemplateDocument::from(json!({"x": 1}))
        );
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CloudAssembly::from_directory(dir.path()),
            Err(AssemblyError::ManifestMissing(_))
        ));
    }

    #[test]
    fn test_stack_without_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"stacks": [{"stackName": "Empty"}]}"#,
        )
        .unwrap();

        assert!(matches!(
            CloudAssembly::from_directory(dir.path()),
            Err(AssemblyError::MissingTemplate(name)) if name == "Empty"
        ));
    }
}
