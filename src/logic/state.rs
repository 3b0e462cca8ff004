use std::collections::BTreeSet;

use crate::model::FilterCriteria;

/// Default grid size of the listing page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// The single source of truth for what the listing shows: current criteria
/// plus 1-based page position. Immutable; every change goes through
/// [`reduce`] so the page-reset policy cannot be bypassed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub criteria: FilterCriteria,
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    /// Replace the whole criteria object. Resets the page to 1: a page
    /// number is only meaningful for the filtered set it was derived from.
    SetCriteria(FilterCriteria),
    /// Replace only the multi-select color labels. Also resets the page.
    SetColorLabels(BTreeSet<String>),
    GoToPage(usize),
    Reset,
}

pub fn reduce(state: &FilterState, action: FilterAction) -> FilterState {
    match action {
        FilterAction::SetCriteria(criteria) => FilterState {
            criteria,
            page: 1,
            page_size: state.page_size,
        },
        FilterAction::SetColorLabels(color_labels) => FilterState {
            criteria: FilterCriteria {
                color_labels,
                ..state.criteria.clone()
            },
            page: 1,
            page_size: state.page_size,
        },
        FilterAction::GoToPage(page) => FilterState {
            page: page.max(1),
            ..state.clone()
        },
        FilterAction::Reset => FilterState {
            page_size: state.page_size,
            ..FilterState::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_change_resets_page() {
        let state = reduce(&FilterState::default(), FilterAction::GoToPage(4));
        assert_eq!(state.page, 4);

        let criteria = FilterCriteria {
            brand: Some("Honda".to_string()),
            ..Default::default()
        };
        let state = reduce(&state, FilterAction::SetCriteria(criteria));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn color_change_resets_page_but_keeps_other_dimensions() {
        let mut state = FilterState::default();
        state.criteria.brand = Some("Yamaha".to_string());
        state.page = 3;

        let state = reduce(
            &state,
            FilterAction::SetColorLabels(BTreeSet::from(["Đỏ".to_string()])),
        );
        assert_eq!(state.page, 1);
        assert_eq!(state.criteria.brand.as_deref(), Some("Yamaha"));
        assert!(state.criteria.color_labels.contains("Đỏ"));
    }

    #[test]
    fn goto_page_clamps_to_one() {
        let state = reduce(&FilterState::default(), FilterAction::GoToPage(0));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn reset_keeps_page_size() {
        let mut state = FilterState::default();
        state.page_size = 24;
        state.page = 5;
        let state = reduce(&state, FilterAction::Reset);
        assert_eq!(state, FilterState { page_size: 24, ..FilterState::default() });
    }
}
