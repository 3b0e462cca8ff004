use crate::logic::ColorMatcher;
use crate::model::{EngineCapacityFilter, FilterCriteria, Product, ProductGroup};

/// Client-side composite filter over an already-fetched page of products.
///
/// Dimensions AND together; a multi-select dimension ORs over its values.
/// Evaluation is pure, order preserving, and never mutates the input. The
/// backend pre-filters the coarse dimensions; this engine exists for the
/// dimensions the server cannot express precisely (fuzzy color, compound
/// vehicle compatibility) and re-checks the rest for consistency.
pub struct FilterEngine<'a> {
    matcher: &'a ColorMatcher,
}

impl<'a> FilterEngine<'a> {
    pub fn new(matcher: &'a ColorMatcher) -> Self {
        Self { matcher }
    }

    pub fn apply(&self, products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p, criteria))
            .cloned()
            .collect()
    }

    pub fn matches(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        self.matches_province(product, criteria)
            && self.matches_brand(product, criteria)
            && self.matches_condition(product, criteria)
            && self.matches_group(product, criteria)
            && self.matches_types(product, criteria)
            && self.matches_size(product, criteria)
            && self.matches_year(product, criteria)
            && self.matches_mileage(product, criteria)
            && self.matches_engine_capacity(product, criteria)
            && self.matches_colors(product, criteria)
            && self.matches_vehicle(product, criteria)
    }

    fn matches_province(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        eq_dimension(criteria.province.as_deref(), product.location.as_deref())
    }

    fn matches_brand(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        eq_dimension(criteria.brand.as_deref(), Some(product.brand.as_str()))
    }

    fn matches_condition(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        // Condition values come from two different form widgets with
        // inconsistent casing, so this dimension folds case.
        match criteria.condition.as_deref() {
            None => true,
            Some(wanted) => product
                .condition
                .as_deref()
                .map_or(false, |have| !have.is_empty() && have.eq_ignore_ascii_case(wanted)),
        }
    }

    fn matches_group(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        match criteria.product_group {
            ProductGroup::All => true,
            ProductGroup::Accessory => has_text(product.accessory_type.as_deref()),
            ProductGroup::Spare => has_text(product.spare_part_type.as_deref()),
        }
    }

    fn matches_types(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        eq_dimension(criteria.accessory_type.as_deref(), product.accessory_type.as_deref())
            && eq_dimension(criteria.spare_part_type.as_deref(), product.spare_part_type.as_deref())
    }

    fn matches_size(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        eq_dimension(criteria.size.as_deref(), product.size.as_deref())
    }

    // Numeric dimensions are permissive: a product missing the attribute is
    // passed through, not excluded. Matches the observed marketplace
    // behavior; flagged as an open question with product owners.

    fn matches_year(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        match (criteria.min_year, product.year) {
            (Some(min), Some(year)) => year >= min,
            _ => true,
        }
    }

    fn matches_mileage(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        match (criteria.max_mileage, product.mileage) {
            (Some(max), Some(mileage)) => mileage <= max,
            _ => true,
        }
    }

    fn matches_engine_capacity(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        let Some(filter) = criteria.engine_capacity else {
            return true;
        };
        let Some(cc) = product.engine_capacity else {
            return true;
        };
        match filter {
            EngineCapacityFilter::Exact(wanted) => cc == wanted,
            EngineCapacityFilter::Range { min, max } => {
                min.map_or(true, |m| cc >= m) && max.map_or(true, |m| cc <= m)
            }
        }
    }

    fn matches_colors(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        if criteria.color_labels.is_empty() {
            return true;
        }
        self.matcher.matches_any(
            product.color.as_deref(),
            criteria.color_labels.iter().map(String::as_str),
        )
    }

    fn matches_vehicle(&self, product: &Product, criteria: &FilterCriteria) -> bool {
        // The UI always pairs brand with model; brand alone does not
        // constrain this dimension.
        let (Some(brand), Some(model)) =
            (criteria.vehicle_brand.as_deref(), criteria.vehicle_model.as_deref())
        else {
            return true;
        };
        let needle = format!("{} {}", brand, model).to_lowercase();
        product
            .vehicle_compatible
            .as_deref()
            .map_or(false, |text| text.to_lowercase().contains(&needle))
    }
}

/// Exact, case-sensitive equality dimension. An unset criterion passes
/// everything; a present-but-empty product field matches nothing.
fn eq_dimension(wanted: Option<&str>, have: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => have.map_or(false, |have| !have.is_empty() && have == wanted),
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.map_or(false, |v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn fixture() -> Vec<Product> {
        vec![
            Product::new("p1", "Honda", "Wave Alpha", 18_500_000.0)
                .with_color("Đen nhám")
                .with_location("Hà Nội")
                .with_condition("Mới")
                .with_engine_capacity(110)
                .with_year(2021)
                .with_mileage(0),
            Product::new("p2", "Yamaha", "Exciter", 47_000_000.0)
                .with_color("xanh GP")
                .with_location("Hồ Chí Minh")
                .with_condition("Đã sử dụng")
                .with_engine_capacity(150)
                .with_year(2019)
                .with_mileage(12_000),
            Product::new("p3", "GIVI", "HRX", 950_000.0)
                .with_accessory_type("Mũ bảo hiểm")
                .with_size("L")
                .with_color("Trắng"),
            Product::new("p4", "Honda", "Lọc gió Winner X", 320_000.0)
                .with_spare_part_type("Lọc gió")
                .with_vehicle_compatible("Honda Winner X 2020, Honda Winner X 2022"),
        ]
    }

    fn engine_apply(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
        let matcher = ColorMatcher::default();
        FilterEngine::new(&matcher).apply(products, criteria)
    }

    #[test]
    fn open_criteria_is_identity() {
        let products = fixture();
        let out = engine_apply(&products, &FilterCriteria::default());
        assert_eq!(out, products);
    }

    #[test]
    fn filtering_never_grows_and_preserves_order() {
        let products = fixture();
        let criteria = FilterCriteria {
            brand: Some("Honda".to_string()),
            ..Default::default()
        };
        let out = engine_apply(&products, &criteria);
        assert!(out.len() <= products.len());
        assert_eq!(
            out.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["p1", "p4"]
        );
    }

    #[test]
    fn brand_is_case_sensitive_condition_is_not() {
        let products = fixture();
        let lower_brand = FilterCriteria {
            brand: Some("honda".to_string()),
            ..Default::default()
        };
        assert!(engine_apply(&products, &lower_brand).is_empty());

        let condition = FilterCriteria {
            condition: Some("mới".to_string()),
            ..Default::default()
        };
        let out = engine_apply(&products, &condition);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "p1");
    }

    #[test]
    fn group_filter_requires_type_tag() {
        let products = fixture();
        let accessories = FilterCriteria {
            product_group: ProductGroup::Accessory,
            ..Default::default()
        };
        let out = engine_apply(&products, &accessories);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "p3");

        let spares = FilterCriteria {
            product_group: ProductGroup::Spare,
            ..Default::default()
        };
        let out = engine_apply(&products, &spares);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "p4");
    }

    #[test]
    fn color_multi_select_is_or() {
        let products = fixture();
        let criteria = FilterCriteria {
            color_labels: BTreeSet::from(["Đen".to_string(), "Trắng".to_string()]),
            ..Default::default()
        };
        let out = engine_apply(&products, &criteria);
        assert_eq!(
            out.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["p1", "p3"]
        );
    }

    #[test]
    fn color_filter_excludes_untagged_products() {
        let products = fixture();
        let criteria = FilterCriteria {
            color_labels: BTreeSet::from(["Đen".to_string()]),
            ..Default::default()
        };
        // p4 has no color at all and must not match.
        assert!(engine_apply(&products, &criteria).iter().all(|p| p.id != "p4"));
    }

    #[test]
    fn missing_numeric_attribute_passes_range_filters() {
        let products = fixture();
        let criteria = FilterCriteria {
            min_year: Some(2020),
            max_mileage: Some(5_000),
            engine_capacity: Some(EngineCapacityFilter::Range {
                min: Some(100),
                max: Some(160),
            }),
            ..Default::default()
        };
        let out = engine_apply(&products, &criteria);
        // p1 satisfies everything; p2 fails year+mileage; p3/p4 have none of
        // the numeric attributes and pass through.
        assert_eq!(
            out.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["p1", "p3", "p4"]
        );
    }

    #[test]
    fn engine_capacity_exact_form() {
        let products = fixture();
        let criteria = FilterCriteria {
            engine_capacity: Some(EngineCapacityFilter::Exact(150)),
            ..Default::default()
        };
        let out = engine_apply(&products, &criteria);
        assert_eq!(
            out.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["p2", "p3", "p4"]
        );
    }

    #[test]
    fn vehicle_dimension_needs_brand_and_model() {
        let products = fixture();
        let paired = FilterCriteria {
            vehicle_brand: Some("Honda".to_string()),
            vehicle_model: Some("Winner X".to_string()),
            ..Default::default()
        };
        let out = engine_apply(&products, &paired);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "p4");

        let brand_only = FilterCriteria {
            vehicle_brand: Some("Honda".to_string()),
            ..Default::default()
        };
        assert_eq!(engine_apply(&products, &brand_only).len(), products.len());
    }

    #[test]
    fn vehicle_match_is_case_insensitive_substring() {
        let products = fixture();
        let criteria = FilterCriteria {
            vehicle_brand: Some("honda".to_string()),
            vehicle_model: Some("winner x".to_string()),
            ..Default::default()
        };
        assert_eq!(engine_apply(&products, &criteria).len(), 1);
    }
}
