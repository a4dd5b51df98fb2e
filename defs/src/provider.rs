use async_trait::async_trait;

use crate::{DiffNode, StackArtifact, StackIdentifier, TemplateDocument};

/// Read-only view of the deployment backend used while diffing.
#[async_trait]
pub trait RemoteFetchGateway: Send + Sync {
    /// `None` when the stack was never deployed.
    async fn fetch_current_template(
        &self,
        stack: &StackIdentifier,
    ) -> Result<Option<TemplateDocument>, anyhow::Error>;
    /// Physical id of a nested stack from the parent's resource summaries.
    async fn resolve_child_physical_id(
        &self,
        parent: &StackIdentifier,
        child_key: &str,
    ) -> Result<Option<String>, anyhow::Error>;
    async fn supports_change_set_diff(&self, stack: &StackIdentifier) -> bool;
    async fn compute_change_set_diff(
        &self,
        stack: &StackIdentifier,
        desired: &TemplateDocument,
    ) -> Result<DiffNode, anyhow::Error>;
}

/// Output of synthesis: the stacks that can be diffed and their nested
/// templates.
pub trait AssemblySource: Send + Sync {
    fn stacks(&self) -> &[StackArtifact];
    fn load_nested_template(&self, locator: &str) -> Result<TemplateDocument, anyhow::Error>;
}
