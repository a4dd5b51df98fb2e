use async_trait::async_trait;
use plan_defs::{DiffNode, RemoteFetchGateway, StackIdentifier, TemplateDocument};
use plan_utils::diff_templates;

/// Gateway for an empty backend: nothing has been deployed yet.
#[derive(Clone, Default)]
pub struct NoBackendGateway;

#[async_trait]
impl RemoteFetchGateway for NoBackendGateway {
    async fn fetch_current_template(
        &self,
        _stack: &StackIdentifier,
    ) -> Result<Option<TemplateDocument>, anyhow::Error> {
        Ok(None)
    }

    async fn resolve_child_physical_id(
        &self,
        _parent: &StackIdentifier,
        _child_key: &str,
    ) -> Result<Option<String>, anyhow::Error> {
        Ok(None)
    }

    async fn supports_change_set_diff(&self, _stack: &StackIdentifier) -> bool {
        false
    }

    async fn compute_change_set_diff(
        &self,
        _stack: &StackIdentifier,
        desired: &TemplateDocument,
    ) -> Result<DiffNode, anyhow::Error> {
        Ok(diff_templates(None, desired))
    }
}
