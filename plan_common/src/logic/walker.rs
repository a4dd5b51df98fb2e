use std::future::Future;
use std::pin::Pin;

use indexmap::IndexMap;
use log::{debug, info};
use plan_defs::{
    errors::DiffError, AssemblySource, DiffNode, DiffReport, RemoteFetchGateway,
    StackDiffResult, StackIdentifier, StackNode, TemplateDocument,
};
use plan_utils::{diff_templates, find_child_references};

type ResolveFuture<'b> = Pin<Box<dyn Future<Output = Result<StackNode, DiffError>> + Send + 'b>>;

/// Diffs one stack and every nested stack below it.
pub struct NestedDiffWalker<'a> {
    gateway: &'a dyn RemoteFetchGateway,
    assembly: &'a dyn AssemblySource,
    change_set: bool,
}

impl<'a> NestedDiffWalker<'a> {
    pub fn new(
        gateway: &'a dyn RemoteFetchGateway,
        assembly: &'a dyn AssemblySource,
        change_set: bool,
    ) -> Self {
        NestedDiffWalker {
            gateway,
            assembly,
            change_set,
        }
    }

    /// Returns one result for the stack followed by one per nested stack,
    /// parents before children. Any failed lookup aborts the whole walk.
    pub async fn walk(
        &self,
        stack_name: &str,
        desired: &TemplateDocument,
    ) -> Result<DiffReport, DiffError> {
        let identifier = StackIdentifier::new(stack_name);

        // Change sets are only ever requested for the top-level stack
        let root_diff = if self.change_set {
            self.change_set_diff(stack_name, &identifier, desired).await?
        } else {
            None
        };

        let tree = self
            .resolve(stack_name.to_string(), Some(identifier), desired.clone())
            .await?;

        Ok(diff_tree(&tree, root_diff))
    }

    async fn change_set_diff(
        &self,
        stack_name: &str,
        identifier: &StackIdentifier,
        desired: &TemplateDocument,
    ) -> Result<Option<DiffNode>, DiffError> {
        if !self.gateway.supports_change_set_diff(identifier).await {
            info!(
                "Change set diff is not available for stack {}, comparing templates",
                stack_name
            );
            return Ok(None);
        }
        info!("Computing change set diff for stack {}", stack_name);
        self.gateway
            .compute_change_set_diff(identifier, desired)
            .await
            .map(Some)
            .map_err(|e| DiffError::fetch(stack_name, e))
    }

    /// Pairs each stack with its deployed template and recurses into the
    /// nested stacks its desired template declares.
    ///
    /// A nested stack that cannot be located in the backend is treated as
    /// never deployed, and so are all of its descendants.
    fn resolve<'b>(
        &'b self,
        name: String,
        identifier: Option<StackIdentifier>,
        desired: TemplateDocument,
    ) -> ResolveFuture<'b> {
        Box::pin(async move {
            let current_template = match &identifier {
                Some(id) => self
                    .gateway
                    .fetch_current_template(id)
                    .await
                    .map_err(|e| DiffError::fetch(&name, e))?,
                None => None,
            };

            let mut children = IndexMap::new();
            for reference in find_child_references(&desired) {
                let physical_id = match &identifier {
                    Some(parent) => self
                        .gateway
                        .resolve_child_physical_id(parent, &reference.key)
                        .await
                        .map_err(|e| DiffError::fetch(&reference.key, e))?,
                    None => None,
                };
                debug!(
                    "Nested stack {} of {} resolves to {:?}",
                    reference.key, name, physical_id
                );

                let child_desired = self
                    .assembly
                    .load_nested_template(&reference.locator)
                    .map_err(|e| DiffError::fetch(&reference.key, e))?;

                let child = self
                    .resolve(
                        reference.key.clone(),
                        physical_id.map(StackIdentifier::new),
                        child_desired,
                    )
                    .await?;
                children.insert(reference.key, child);
            }

            Ok(StackNode {
                name,
                identifier,
                current_template,
                desired_template: desired,
                children,
            })
        })
    }
}

fn diff_tree(tree: &StackNode, root_diff: Option<DiffNode>) -> DiffReport {
    let mut report = DiffReport::new();
    let mut nodes = tree.pre_order().into_iter();

    if let Some(root) = nodes.next() {
        let diff = root_diff.unwrap_or_else(|| {
            diff_templates(root.current_template.as_ref(), &root.desired_template)
        });
        push_result(&mut report, &root.name, diff);
    }
    for node in nodes {
        let diff = diff_templates(node.current_template.as_ref(), &node.desired_template);
        push_result(&mut report, &node.name, diff);
    }
    report
}

fn push_result(report: &mut DiffReport, stack_name: &str, diff: DiffNode) {
    debug!(
        "Stack {} has {} difference(s)",
        stack_name,
        diff.difference_count()
    );
    report.push(StackDiffResult::new(stack_name, diff));
}
