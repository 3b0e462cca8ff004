use std::collections::{HashMap, HashSet};

use anyhow::Result;
use parking_lot::RwLock;

use crate::model::{Category, Id, Product, ProductQuery, SortField};
use crate::store::{CategoryStore, FavoriteStore, ProductStore};

/// In-memory implementation of the remote collaborators. Serves as the
/// bundled backend for demos and tests; a production deployment would put an
/// HTTP client behind the same traits.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    categories: Vec<Category>,
    products: Vec<Product>,
    favorites: HashMap<Id, HashSet<Id>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_category(&self, category: Category) {
        self.inner.write().categories.push(category);
    }

    pub fn insert_product(&self, product: Product) {
        self.inner.write().products.push(product);
    }

    pub fn category_count(&self) -> usize {
        self.inner.read().categories.len()
    }

    pub fn product_count(&self) -> usize {
        self.inner.read().products.len()
    }
}

/// The coarse filter the real backend supports: equality on tagged fields,
/// min/max on the numeric ones, substring on vehicle compatibility and raw
/// color text. Anything fuzzier is the FilterEngine's job.
fn query_matches(product: &Product, query: &ProductQuery) -> bool {
    let eq = |wanted: &Option<String>, have: Option<&str>| match wanted.as_deref() {
        None => true,
        Some(w) => have.map_or(false, |h| h == w),
    };
    let contains_ci = |wanted: &Option<String>, have: Option<&str>| match wanted.as_deref() {
        None => true,
        Some(w) => have.map_or(false, |h| h.to_lowercase().contains(&w.to_lowercase())),
    };

    eq(&query.brand, Some(product.brand.as_str()))
        && eq(&query.location, product.location.as_deref())
        && eq(&query.condition, product.condition.as_deref())
        && eq(&query.accessory_type, product.accessory_type.as_deref())
        && eq(&query.spare_part_type, product.spare_part_type.as_deref())
        && eq(&query.size, product.size.as_deref())
        && contains_ci(&query.color, product.color.as_deref())
        && contains_ci(&query.vehicle_compatible, product.vehicle_compatible.as_deref())
        && query.min_year.map_or(true, |min| product.year.map_or(true, |y| y >= min))
        && query
            .max_mileage
            .map_or(true, |max| product.mileage.map_or(true, |m| m <= max))
        && query
            .engine_capacity
            .map_or(true, |cc| product.engine_capacity.map_or(true, |have| have == cc))
}

#[async_trait::async_trait]
impl CategoryStore for MemoryStore {
    async fn fetch_categories(&self, page_size: usize, page_number: usize) -> Result<Vec<Category>> {
        let inner = self.inner.read();
        let page_size = page_size.max(1);
        let start = page_number.max(1).saturating_sub(1).saturating_mul(page_size);
        Ok(inner
            .categories
            .iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ProductStore for MemoryStore {
    async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let inner = self.inner.read();
        let mut products: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| query_matches(p, query))
            .cloned()
            .collect();

        if let Some(sort_by) = query.sort_by {
            products.sort_by(|a, b| {
                let ordering = match sort_by {
                    SortField::Price => a.price.total_cmp(&b.price),
                    SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                    SortField::Year => a.year.cmp(&b.year),
                };
                if query.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }

        if let (Some(page), Some(page_size)) = (query.page, query.page_size) {
            let page_size = page_size.max(1);
            let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
            products = products.into_iter().skip(start).take(page_size).collect();
        }

        Ok(products)
    }
}

#[async_trait::async_trait]
impl FavoriteStore for MemoryStore {
    async fn get_favorites(&self, user_id: &Id) -> Result<Vec<Product>> {
        let inner = self.inner.read();
        let ids = match inner.favorites.get(user_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(inner
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn add_favorite(&self, product_id: &Id, user_id: &Id) -> Result<()> {
        let mut inner = self.inner.write();
        anyhow::ensure!(
            inner.products.iter().any(|p| &p.id == product_id),
            "unknown product {product_id}"
        );
        inner
            .favorites
            .entry(user_id.clone())
            .or_default()
            .insert(product_id.clone());
        Ok(())
    }

    async fn remove_favorite(&self, product_id: &Id, user_id: &Id) -> Result<()> {
        let mut inner = self.inner.write();
        if let Some(ids) = inner.favorites.get_mut(user_id) {
            ids.remove(product_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_products() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_product(
            Product::new("p1", "Honda", "Wave Alpha", 18_500_000.0)
                .with_location("Hà Nội")
                .with_year(2021),
        );
        store.insert_product(
            Product::new("p2", "Yamaha", "Exciter", 47_000_000.0)
                .with_location("Hồ Chí Minh")
                .with_year(2019),
        );
        store.insert_product(Product::new("p3", "Honda", "Vision", 31_000_000.0).with_year(2022));
        store
    }

    #[tokio::test]
    async fn fetch_products_applies_coarse_equality() {
        let store = store_with_products();
        let query = ProductQuery {
            brand: Some("Honda".to_string()),
            ..Default::default()
        };
        let products = store.fetch_products(&query).await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.brand == "Honda"));
    }

    #[tokio::test]
    async fn fetch_products_sorts_and_pages() {
        let store = store_with_products();
        let query = ProductQuery {
            sort_by: Some(SortField::Price),
            ascending: true,
            page: Some(1),
            page_size: Some(2),
            ..Default::default()
        };
        let products = store.fetch_products(&query).await.unwrap();
        assert_eq!(
            products.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["p1", "p3"]
        );
    }

    #[tokio::test]
    async fn fetch_categories_pages_in_input_order() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.insert_category(Category::new(format!("c{i}"), format!("Cat {i}"), None));
        }
        let page = store.fetch_categories(2, 2).await.unwrap();
        assert_eq!(
            page.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["c2", "c3"]
        );
    }

    #[tokio::test]
    async fn favorites_round_trip() {
        let store = store_with_products();
        let user = "user-1".to_string();
        store.add_favorite(&"p1".to_string(), &user).await.unwrap();
        store.add_favorite(&"p1".to_string(), &user).await.unwrap(); // idempotent
        assert_eq!(store.get_favorites(&user).await.unwrap().len(), 1);

        store.remove_favorite(&"p1".to_string(), &user).await.unwrap();
        assert!(store.get_favorites(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_favorite_rejects_unknown_product() {
        let store = store_with_products();
        let err = store
            .add_favorite(&"nope".to_string(), &"user-1".to_string())
            .await;
        assert!(err.is_err());
    }
}
