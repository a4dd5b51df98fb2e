use std::path::Path;

use async_trait::async_trait;
use log::debug;
use plan_defs::{
    errors::TemplateError, DeployedState, DiffNode, RemoteFetchGateway, StackIdentifier,
    TemplateDocument,
};
use plan_utils::{diff_templates, read_document};

/// Serves templates and resource summaries from a snapshot of the backend.
///
/// The snapshot is owned by the gateway, so each invocation works on its own
/// copy.
#[derive(Clone, Default)]
pub struct DeployedStateGateway {
    state: DeployedState,
}

impl DeployedStateGateway {
    pub fn new(state: DeployedState) -> Self {
        DeployedStateGateway { state }
    }

    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let state: DeployedState = read_document(path)?;
        debug!(
            "Loaded deployed state for {} stack(s) from {}",
            state.stacks.len(),
            path.display()
        );
        Ok(DeployedStateGateway::new(state))
    }
}

#[async_trait]
impl RemoteFetchGateway for DeployedStateGateway {
    async fn fetch_current_template(
        &self,
        stack: &StackIdentifier,
    ) -> Result<Option<TemplateDocument>, anyhow::Error> {
        Ok(self
            .state
            .stacks
            .get(stack.as_str())
            .map(|deployed| deployed.template.clone()))
    }

    async fn resolve_child_physical_id(
        &self,
        parent: &StackIdentifier,
        child_key: &str,
    ) -> Result<Option<String>, anyhow::Error> {
        Ok(self
            .state
            .stacks
            .get(parent.as_str())
            .and_then(|deployed| deployed.nested_stacks.get(child_key))
            .cloned())
    }

    async fn supports_change_set_diff(&self, stack: &StackIdentifier) -> bool {
        self.state
            .stacks
            .get(stack.as_str())
            .is_some_and(|deployed| deployed.change_set)
    }

    async fn compute_change_set_diff(
        &self,
        stack: &StackIdentifier,
        desired: &TemplateDocument,
    ) -> Result<DiffNode, anyhow::Error> {
        let current = self
            .state
            .stacks
            .get(stack.as_str())
            .map(|deployed| &deployed.template);
        Ok(diff_templates(current, desired))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_defs::DeployedStack;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn gateway() -> DeployedStateGateway {
        DeployedStateGateway::new(
            DeployedState::default()
                .with_stack(
                    "Parent",
                    DeployedStack::new(json!({"Resources": {}}).into())
                        .with_change_set()
                        .with_nested_stack("Child", "arn:child"),
                )
                .with_stack("arn:child", DeployedStack::new(json!({"x": 1}).into())),
        )
    }

    #[tokio::test]
    async fn test_fetch_by_name_and_physical_id() {
        let gateway = gateway();

        let parent = gateway
            .fetch_current_template(&StackIdentifier::new("Parent"))
            .await
            .unwrap();
        let child = gateway
            .fetch_current_template(&StackIdentifier::new("arn:child"))
            .await
            .unwrap();
        let missing = gateway
            .fetch_current_template(&StackIdentifier::new("Missing"))
            .await
            .unwrap();

        assert_eq!(parent, Some(TemplateDocument::from(json!({"Resources": {}}))));
        assert_eq!(child, Some(TemplateDocument::from(json!({"x": 1}))));
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_resolve_child_physical_id() {
        let gateway = gateway();
        let parent = StackIdentifier::new("Parent");

        assert_eq!(
            gateway
                .resolve_child_physical_id(&parent, "Child")
                .await
                .unwrap(),
            Some("arn:child".to_string())
        );
        assert_eq!(
            gateway
                .resolve_child_physical_id(&parent, "Other")
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            gateway
                .resolve_child_physical_id(&StackIdentifier::new("Missing"), "Child")
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_change_set_support_is_per_stack() {
        let gateway = gateway();

        assert!(
            gateway
                .supports_change_set_diff(&StackIdentifier::new("Parent"))
                .await
        );
        assert!(
            !gateway
                .supports_change_set_diff(&StackIdentifier::new("arn:child"))
                .await
        );
    }
}
