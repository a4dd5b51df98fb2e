use std::io::Write;

use log::{debug, error, info, warn};
use plan_defs::{
    errors::DiffError, AssemblySource, DiagnosticLevel, DiffReport, RemoteFetchGateway,
    StackArtifact,
};
use plan_utils::{render_report, RenderOptions};

use crate::logic::{select_stacks, NestedDiffWalker};

#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Omit stacks without differences from the output
    pub quiet: bool,
    /// Exit with 1 when any stack has differences
    pub fail: bool,
    /// Ask the backend for a change set diff of each requested stack
    pub change_set: bool,
    /// Do not include the dependencies of the requested stacks
    pub exclusively: bool,
    pub color: bool,
}

/// Diffs the requested stacks against what is deployed and writes the
/// rendered report to `out`.
///
/// Returns the process exit status. When a stack fails to diff, the
/// remaining stacks are still diffed and written before the first failure is
/// returned.
pub async fn diff_stacks(
    assembly: &dyn AssemblySource,
    gateway: &dyn RemoteFetchGateway,
    stack_names: &[String],
    options: &DiffOptions,
    out: &mut impl Write,
) -> Result<i32, DiffError> {
    let selected = select_stacks(assembly.stacks(), stack_names, options.exclusively)?;
    info!(
        "Diffing {} stack(s): {}",
        selected.len(),
        selected
            .iter()
            .map(|s| s.stack_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    check_diagnostics(&selected)?;

    let walker = NestedDiffWalker::new(gateway, assembly, options.change_set);
    let mut report = DiffReport::new();
    let mut first_failure = None;
    for stack in &selected {
        match walker.walk(&stack.stack_name, &stack.template).await {
            Ok(stack_report) => report.append(stack_report),
            Err(e) => {
                error!("{}", e);
                first_failure.get_or_insert(e);
            }
        }
    }

    let rendered = render_report(
        &report,
        &RenderOptions {
            quiet: options.quiet,
            color: options.color,
        },
    );
    out.write_all(rendered.as_bytes())?;
    out.flush()?;

    if let Some(failure) = first_failure {
        return Err(failure);
    }

    let with_differences = report.stacks_with_differences();
    debug!(
        "{} of {} stack(s) have differences",
        with_differences,
        report.len()
    );
    Ok(exit_code(with_differences, options.fail))
}

pub fn exit_code(stacks_with_differences: usize, fail: bool) -> i32 {
    if fail && stacks_with_differences > 0 {
        1
    } else {
        0
    }
}

// Synthesis errors in any selected stack abort before anything is diffed
fn check_diagnostics(selected: &[&StackArtifact]) -> Result<(), DiffError> {
    let mut failed: Vec<String> = vec![];
    for stack in selected {
        for diagnostic in &stack.diagnostics {
            match diagnostic.level {
                DiagnosticLevel::Error => {
                    error!("[{}] {}", diagnostic.path, diagnostic.message);
                    if !failed.contains(&stack.stack_name) {
                        failed.push(stack.stack_name.clone());
                    }
                }
                DiagnosticLevel::Warning => {
                    warn!("[{}] {}", diagnostic.path, diagnostic.message)
                }
                DiagnosticLevel::Info => {
                    debug!("[{}] {}", diagnostic.path, diagnostic.message)
                }
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(DiffError::FoundErrors(failed))
    }
}
