use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Coarse product family toggle. `All` imposes no constraint; the other two
/// require the corresponding type tag to be present on the product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductGroup {
    #[default]
    All,
    Accessory,
    Spare,
}

/// Engine displacement filter. The listing UI uses both an exact dropdown
/// and a min/max slider, so both forms are first-class here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EngineCapacityFilter {
    Exact(u32),
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
}

/// One independently optional axis per field. An absent field means "no
/// constraint on that dimension", never "exclude all". Unknown fields in
/// incoming JSON are ignored so older clients keep working.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Multi-select canonical color labels, OR semantics within the set.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub color_labels: BTreeSet<String>,
    #[serde(default)]
    pub product_group: ProductGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_part_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mileage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_capacity: Option<EngineCapacityFilter>,
}

impl FilterCriteria {
    /// True when no dimension is constrained, i.e. `apply` is the identity.
    pub fn is_open(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

/// Server-side pre-filter passed to the product fetch collaborator. The
/// backend only supports the coarse equality/range dimensions; fuzzy color
/// and the compound vehicle match are re-applied client-side by the
/// FilterEngine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mileage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_part_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_compatible: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(default)]
    pub ascending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Price,
    CreatedAt,
    Year,
}
