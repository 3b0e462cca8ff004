use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::Id;

/// The set of products a user has favorited. Scoped to exactly one user;
/// cleared when the session drops to anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSet {
    pub user_id: Id,
    pub product_ids: HashSet<Id>,
}

impl FavoriteSet {
    pub fn empty(user_id: impl Into<Id>) -> Self {
        Self {
            user_id: user_id.into(),
            product_ids: HashSet::new(),
        }
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.product_ids.contains(product_id)
    }

    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }
}
