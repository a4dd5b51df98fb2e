use std::fs;
use std::path::Path;

use plan_defs::{errors::TemplateError, TemplateDocument};
use serde::de::DeserializeOwned;

/// Reads a JSON document, or YAML when the file ends in `.yaml`/`.yml`.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, TemplateError> {
    let display = path.display().to_string();
    let content =
        fs::read_to_string(path).map_err(|e| TemplateError::Read(display.clone(), e))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yaml" || ext == "yml");

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| TemplateError::Parse(display, e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| TemplateError::Parse(display, e.to_string()))
    }
}

pub fn read_template_file(path: &Path) -> Result<TemplateDocument, TemplateError> {
    read_document(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_read_json_and_yaml_templates() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("stack.template.json");
        let yaml_path = dir.path().join("stack.template.yaml");
        fs::write(&json_path, r#"{"Resources": {"Queue": {"Type": "AWS::SQS::Queue"}}}"#).unwrap();
        fs::write(&yaml_path, "Resources:\n  Queue:\n    Type: AWS::SQS::Queue\n").unwrap();

        let from_json = read_template_file(&json_path).unwrap();
        let from_yaml = read_template_file(&yaml_path).unwrap();

        let expected: TemplateDocument =
            json!({"Resources": {"Queue": {"Type": "AWS::SQS::Queue"}}}).into();
        assert_eq!(from_json, expected);
        assert_eq!(from_yaml, expected);
    }

    #[test]
    fn test_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{not json").unwrap();

        assert!(matches!(
            read_template_file(&dir.path().join("missing.json")),
            Err(TemplateError::Read(_, _))
        ));
        assert!(matches!(
            read_template_file(&broken),
            Err(TemplateError::Parse(_, _))
        ));
    }
}
