use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use serde::Serialize;

use crate::model::{Category, CategoryNode, Id, SyntheticSpec, SYNTHETIC_ID_PREFIX};

/// A category whose `parent_id` does not resolve to a reachable node. Dropped
/// from the tree; the caller decides how loudly to report it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrphanCategory {
    pub id: Id,
    pub name: String,
    pub parent_id: Id,
}

/// Result of one build pass: the navigation forest plus any data-quality
/// warnings. Synthetic roots come first, natural roots after, both in input
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryForest {
    pub roots: Vec<CategoryNode>,
    pub orphans: Vec<OrphanCategory>,
}

impl CategoryForest {
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(CategoryNode::node_count).sum()
    }
}

/// Builds the navigation forest from the flat category list the backend
/// returns, then prepends the synthetic subtrees.
///
/// Construction is O(n): one grouping pass builds the parent -> children
/// adjacency, then each root is expanded recursively. The observed data is at
/// most two levels deep but deeper chains attach the same way.
pub struct CategoryTreeBuilder;

impl CategoryTreeBuilder {
    pub fn build(flat_categories: &[Category], synthetic_specs: &[SyntheticSpec]) -> CategoryForest {
        let mut roots: Vec<CategoryNode> = synthetic_specs
            .iter()
            .map(|spec| spec.materialize(None))
            .collect();

        // parent id -> children, preserving input order within each group.
        let mut children_of: HashMap<&str, Vec<&Category>> = flat_categories
            .iter()
            .filter_map(|c| c.parent_id.as_deref().map(|p| (p, c)))
            .into_group_map();

        let mut attached: HashSet<&str> = HashSet::new();
        for category in flat_categories.iter().filter(|c| c.parent_id.is_none()) {
            attached.insert(category.id.as_str());
            roots.push(Self::expand(category, &mut children_of, &mut attached));
        }

        // Whatever never got attached has a parent chain that does not reach
        // a root: a dangling parent_id, a self-loop, or a cycle. All are
        // excluded, never silently promoted to root.
        let orphans = flat_categories
            .iter()
            .filter(|c| c.parent_id.is_some() && !attached.contains(c.id.as_str()))
            .map(|c| OrphanCategory {
                id: c.id.clone(),
                name: c.name.clone(),
                parent_id: c.parent_id.clone().unwrap_or_default(),
            })
            .collect();

        CategoryForest { roots, orphans }
    }

    fn expand<'a>(
        category: &'a Category,
        children_of: &mut HashMap<&'a str, Vec<&'a Category>>,
        attached: &mut HashSet<&'a str>,
    ) -> CategoryNode {
        let mut node = CategoryNode::natural(category.clone());
        if let Some(children) = children_of.remove(category.id.as_str()) {
            for child in children {
                // A child id equal to an already-attached id would mean a
                // cycle; removal from the adjacency map makes revisiting
                // impossible, so plain recursion terminates.
                attached.insert(child.id.as_str());
                node.children.push(Self::expand(child, children_of, attached));
            }
        }
        node
    }
}

/// Sanity check used by callers after seeding business rules: synthetic ids
/// live in their own namespace and must never collide with backend ids.
pub fn synthetic_namespace_disjoint(flat_categories: &[Category]) -> bool {
    flat_categories.iter().all(|c| !c.id.starts_with(SYNTHETIC_ID_PREFIX))
}
