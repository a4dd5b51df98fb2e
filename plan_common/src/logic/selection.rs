use std::collections::{HashMap, HashSet};

use log::warn;
use plan_defs::{errors::DiffError, StackArtifact};
use regex::Regex;

/// Resolves the requested stack names against the assembly.
///
/// Each selector is an exact stack name or a pattern where `*` matches any
/// run of characters. Unless `exclusively` is set, the stacks a match
/// depends on are selected first, unless they were already selected. A stack
/// named twice is still diffed twice. With no selectors, every stack is
/// selected in assembly order.
pub fn select_stacks<'a>(
    stacks: &'a [StackArtifact],
    selectors: &[String],
    exclusively: bool,
) -> Result<Vec<&'a StackArtifact>, DiffError> {
    if selectors.is_empty() {
        return Ok(stacks.iter().collect());
    }

    let by_name: HashMap<&str, &StackArtifact> =
        stacks.iter().map(|s| (s.stack_name.as_str(), s)).collect();

    let mut selected = vec![];
    let mut unmatched = vec![];
    let mut seen = HashSet::new();
    for selector in selectors {
        let matches: Vec<&StackArtifact> = stacks
            .iter()
            .filter(|s| selector_matches(selector, &s.stack_name))
            .collect();
        if matches.is_empty() {
            unmatched.push(selector.clone());
            continue;
        }

        for stack in matches {
            seen.insert(stack.stack_name.as_str());
            if !exclusively {
                push_dependencies(stack, &by_name, &mut seen, &mut selected);
            }
            selected.push(stack);
        }
    }

    if selected.is_empty() {
        return Err(DiffError::NoStacksMatch(unmatched));
    }
    if !unmatched.is_empty() {
        warn!("No stacks match the name(s) {}", unmatched.join(","));
    }
    Ok(selected)
}

fn selector_matches(selector: &str, stack_name: &str) -> bool {
    if !selector.contains('*') {
        return selector == stack_name;
    }
    let pattern = selector
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{}$", pattern)).is_ok_and(|re| re.is_match(stack_name))
}

// Transitive dependencies in declaration order, skipping stacks already selected
fn push_dependencies<'a>(
    stack: &'a StackArtifact,
    by_name: &HashMap<&str, &'a StackArtifact>,
    seen: &mut HashSet<&'a str>,
    selected: &mut Vec<&'a StackArtifact>,
) {
    for dependency in &stack.dependencies {
        let Some(dependency) = by_name.get(dependency.as_str()).copied() else {
            continue;
        };
        if !seen.insert(dependency.stack_name.as_str()) {
            continue;
        }
        push_dependencies(dependency, by_name, seen, selected);
        selected.push(dependency);
    }
}
