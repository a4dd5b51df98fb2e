use log::debug;
use plan_defs::{TemplateDocument, ASSET_PATH_METADATA_KEY, NESTED_STACK_RESOURCE_TYPE};

/// A nested stack resource and where its own template can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildReference {
    pub key: String,
    pub locator: String,
}

/// Finds the nested stacks declared in a template's `Resources`, in the order
/// they appear there.
///
/// Nested stack resources without an asset path annotation are skipped.
pub fn find_child_references(template: &TemplateDocument) -> Vec<ChildReference> {
    let resources = match template.get("Resources").and_then(|r| r.as_mapping()) {
        Some(resources) => resources,
        None => return vec![],
    };

    resources
        .iter()
        .filter(|(_, resource)| {
            resource.get("Type").and_then(|t| t.as_str()) == Some(NESTED_STACK_RESOURCE_TYPE)
        })
        .filter_map(|(logical_id, resource)| {
            let locator = resource
                .get("Metadata")
                .and_then(|m| m.get(ASSET_PATH_METADATA_KEY))
                .and_then(|p| p.as_str());
            match locator {
                Some(locator) => Some(ChildReference {
                    key: logical_id.clone(),
                    locator: locator.to_string(),
                }),
                None => {
                    debug!(
                        "Nested stack {} has no {} metadata, not diffing its template",
                        logical_id, ASSET_PATH_METADATA_KEY
                    );
                    None
                }
            }
        })
        .collect()
}
