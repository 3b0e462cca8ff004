use serde::{Deserialize, Serialize};

use crate::model::{synthetic_id, Id};

/// A catalog category as delivered by the remote API.
///
/// `parent_id`, when present, must reference another category id (never the
/// category itself). The tree builder tolerates broken references by dropping
/// the category and reporting it, see `logic::category_tree`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, parent_id: Option<Id>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            description: None,
            image_url: None,
        }
    }
}

/// A node of the derived navigation tree. Built fresh on every input change,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub category: Category,
    /// True for nodes injected by a `SyntheticSpec`, i.e. not backed by a
    /// remote category record.
    pub synthetic: bool,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn natural(category: Category) -> Self {
        Self {
            category,
            synthetic: false,
            children: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::node_count).sum::<usize>()
    }
}

/// Declarative rule for a subtree that exists only in the navigation menu,
/// e.g. "Genuine parts by vehicle" broken down by brand and model. Ids are
/// derived from the label chain so repeated builds are idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    pub label: String,
    #[serde(default)]
    pub children: Vec<SyntheticSpec>,
}

impl SyntheticSpec {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<SyntheticSpec>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Materialize this spec into a tree node, deriving ids from `parent_id`.
    pub fn materialize(&self, parent_id: Option<&str>) -> CategoryNode {
        let id = synthetic_id(parent_id, &self.label);
        let children = self
            .children
            .iter()
            .map(|child| child.materialize(Some(&id)))
            .collect();
        CategoryNode {
            category: Category::new(id, self.label.clone(), parent_id.map(str::to_string)),
            synthetic: true,
            children,
        }
    }

    /// The stock "genuine parts by vehicle" menu: brand roots with their
    /// commonly traded models underneath. Pure business data, not backed by
    /// the remote category table.
    pub fn genuine_parts_by_vehicle() -> Self {
        let brand = |name: &str, models: &[&str]| {
            SyntheticSpec::branch(name, models.iter().copied().map(SyntheticSpec::leaf).collect())
        };
        SyntheticSpec::branch(
            "Phụ tùng chính hãng theo xe",
            vec![
                brand("Honda", &["Wave Alpha", "Vision", "Winner X", "SH", "Air Blade", "Future"]),
                brand("Yamaha", &["Exciter", "Sirius", "Grande", "Jupiter", "NVX"]),
                brand("Suzuki", &["Raider", "Satria", "GSX"]),
                brand("Piaggio", &["Vespa", "Liberty", "Medley"]),
                brand("SYM", &["Attila", "Galaxy", "Star SR"]),
            ],
        )
    }
}
