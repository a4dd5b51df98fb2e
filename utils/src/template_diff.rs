use indexmap::IndexMap;
use plan_defs::{DiffNode, PathSegment, TemplateDocument};

/// Structural diff of a deployed template (if any) against the desired one.
///
/// A missing `old` reports the whole desired template as one addition.
pub fn diff_templates(old: Option<&TemplateDocument>, new: &TemplateDocument) -> DiffNode {
    match old {
        Some(old) => diff_values(old, new),
        None => DiffNode::Added(new.clone()),
    }
}

// Compare two template values and build the diff tree
fn diff_values(old: &TemplateDocument, new: &TemplateDocument) -> DiffNode {
    match (old, new) {
        (TemplateDocument::Mapping(old_map), TemplateDocument::Mapping(new_map)) => {
            let mut children = IndexMap::new();

            // Keys of the old document first, in their document order
            for (key, old_value) in old_map {
                let node = match new_map.get(key) {
                    Some(new_value) => diff_values(old_value, new_value),
                    None => DiffNode::Removed(old_value.clone()),
                };
                children.insert(PathSegment::Key(key.clone()), node);
            }

            // Then keys that only exist in the new document
            for (key, new_value) in new_map {
                if !old_map.contains_key(key) {
                    children.insert(
                        PathSegment::Key(key.clone()),
                        DiffNode::Added(new_value.clone()),
                    );
                }
            }

            DiffNode::Nested(children)
        }
        (TemplateDocument::Sequence(old_items), TemplateDocument::Sequence(new_items)) => {
            // Positional comparison, elements are never realigned by content
            let mut children = IndexMap::new();
            for index in 0..old_items.len().max(new_items.len()) {
                let node = match (old_items.get(index), new_items.get(index)) {
                    (Some(old_item), Some(new_item)) => diff_values(old_item, new_item),
                    (Some(old_item), None) => DiffNode::Removed(old_item.clone()),
                    (None, Some(new_item)) => DiffNode::Added(new_item.clone()),
                    (None, None) => continue,
                };
                children.insert(PathSegment::Index(index), node);
            }
            DiffNode::Nested(children)
        }
        _ => {
            if old == new {
                DiffNode::Unchanged(new.clone())
            } else {
                DiffNode::Changed {
                    old: old.clone(),
                    new: new.clone(),
                }
            }
        }
    }
}
