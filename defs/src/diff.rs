use std::fmt;

use indexmap::IndexMap;

use crate::TemplateDocument;

/// Position of a child inside a mapping (by key) or a sequence (by index).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

/// Result of comparing two template values at one path.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffNode {
    /// Carries the (equal) value so renderers can still read it, e.g. a
    /// resource `Type` that did not change.
    Unchanged(TemplateDocument),
    Added(TemplateDocument),
    Removed(TemplateDocument),
    Changed {
        old: TemplateDocument,
        new: TemplateDocument,
    },
    /// Per-child comparison of two mappings or two sequences. Unchanged
    /// children are kept so callers can tell "nothing changed" apart from
    /// "nothing here".
    Nested(IndexMap<PathSegment, DiffNode>),
}

impl DiffNode {
    /// True when any Added, Removed or Changed node exists in this tree.
    pub fn has_differences(&self) -> bool {
        match self {
            DiffNode::Unchanged(_) => false,
            DiffNode::Added(_) | DiffNode::Removed(_) | DiffNode::Changed { .. } => true,
            DiffNode::Nested(children) => children.values().any(DiffNode::has_differences),
        }
    }

    /// Children that carry at least one difference, in diff order.
    pub fn changed_children(&self) -> Vec<(&PathSegment, &DiffNode)> {
        match self {
            DiffNode::Nested(children) => children
                .iter()
                .filter(|(_, child)| child.has_differences())
                .collect(),
            _ => vec![],
        }
    }

    /// Number of Added, Removed and Changed leaves.
    pub fn difference_count(&self) -> usize {
        match self {
            DiffNode::Unchanged(_) => 0,
            DiffNode::Added(_) | DiffNode::Removed(_) | DiffNode::Changed { .. } => 1,
            DiffNode::Nested(children) => children.values().map(DiffNode::difference_count).sum(),
        }
    }
}

/// Diff of one stack, nested stacks get their own entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StackDiffResult {
    pub stack_name: String,
    pub diff: DiffNode,
    pub has_differences: bool,
}

impl StackDiffResult {
    pub fn new(stack_name: impl Into<String>, diff: DiffNode) -> Self {
        let has_differences = diff.has_differences();
        StackDiffResult {
            stack_name: stack_name.into(),
            diff,
            has_differences,
        }
    }
}

/// Stack diffs in traversal order: every parent precedes its nested stacks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    results: Vec<StackDiffResult>,
}

impl DiffReport {
    pub fn new() -> Self {
        DiffReport::default()
    }

    pub fn push(&mut self, result: StackDiffResult) {
        self.results.push(result);
    }

    pub fn append(&mut self, other: DiffReport) {
        self.results.extend(other.results);
    }

    pub fn results(&self) -> &[StackDiffResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn stacks_with_differences(&self) -> usize {
        self.results.iter().filter(|r| r.has_differences).count()
    }
}
