use anyhow::Result;

use crate::model::{Category, Id, Product, ProductQuery};

/// Category retrieval collaborator. Pagination mirrors the remote API's
/// contract; callers fetch one bounded page per menu build.
#[async_trait::async_trait]
pub trait CategoryStore: Send + Sync {
    async fn fetch_categories(&self, page_size: usize, page_number: usize) -> Result<Vec<Category>>;
}

/// Product retrieval collaborator. The query is the coarse server-side
/// pre-filter; fuzzy dimensions are re-applied client-side by the
/// FilterEngine.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>>;
}

/// Favorites collaborator. Add/remove are expected to be idempotent on the
/// remote side; the synchronizer never retries on its own.
#[async_trait::async_trait]
pub trait FavoriteStore: Send + Sync {
    async fn get_favorites(&self, user_id: &Id) -> Result<Vec<Product>>;
    async fn add_favorite(&self, product_id: &Id, user_id: &Id) -> Result<()>;
    async fn remove_favorite(&self, product_id: &Id, user_id: &Id) -> Result<()>;
}

pub trait Store: CategoryStore + ProductStore + FavoriteStore + Send + Sync {}

impl<T: CategoryStore + ProductStore + FavoriteStore + Send + Sync> Store for T {}
