use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{CatalogError, FavoriteError};
use crate::logic::{paginate, CategoryTreeBuilder, ColorMatcher, FavoritesSynchronizer, FilterEngine, DEFAULT_PAGE_SIZE};
use crate::model::{
    CategoryNode, EngineCapacityFilter, FavoriteSet, FilterCriteria, Id, Product, ProductGroup,
    ProductQuery, SortField, SyntheticSpec,
};
use crate::store::Store;

/// Shared state behind every handler: the remote collaborators plus the
/// session-scoped favorites synchronizer.
pub struct CatalogState<S: Store> {
    pub store: Arc<S>,
    pub matcher: ColorMatcher,
    pub synthetic_specs: Vec<SyntheticSpec>,
    pub favorites: FavoritesSynchronizer<S>,
}

impl<S: Store> CatalogState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            favorites: FavoritesSynchronizer::new(store.clone()),
            store,
            matcher: ColorMatcher::default(),
            synthetic_specs: vec![SyntheticSpec::genuine_parts_by_vehicle()],
        }
    }
}

pub type AppState<S> = Arc<CatalogState<S>>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn fetch_failed(err: CatalogError) -> HandlerError {
    log::error!("{err:#}");
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse::new(&err.to_string())),
    )
}

fn favorite_failed(err: FavoriteError) -> HandlerError {
    let status = match err {
        FavoriteError::Unauthenticated => StatusCode::UNAUTHORIZED,
        FavoriteError::OperationFailed(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(ErrorResponse::new(&err.to_string())))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// How many categories one menu build fetches. The backend data set is small
/// (tens of rows); one page covers it.
const CATEGORY_PAGE_SIZE: usize = 200;

#[derive(Debug, Serialize)]
pub struct CategoryTreeResponse {
    pub roots: Vec<CategoryNode>,
    /// Data-quality signal for the caller; the offending categories are
    /// logged server-side and excluded from `roots`.
    pub orphan_count: usize,
}

pub async fn get_category_tree<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<CategoryTreeResponse>, HandlerError> {
    let categories = state
        .store
        .fetch_categories(CATEGORY_PAGE_SIZE, 1)
        .await
        .map_err(|e| fetch_failed(CatalogError::data_fetch("categories", e)))?;

    let forest = CategoryTreeBuilder::build(&categories, &state.synthetic_specs);
    for orphan in &forest.orphans {
        log::warn!(
            "dropping orphan category {} ({}): parent {} does not resolve",
            orphan.id,
            orphan.name,
            orphan.parent_id
        );
    }

    Ok(Json(CategoryTreeResponse {
        orphan_count: forest.orphans.len(),
        roots: forest.roots,
    }))
}

/// Flat query-string form of the filter state. Multi-select colors arrive
/// comma-separated; unknown parameters are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub province: Option<String>,
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub colors: Option<String>,
    pub group: Option<ProductGroup>,
    pub accessory_type: Option<String>,
    pub spare_part_type: Option<String>,
    pub vehicle_brand: Option<String>,
    pub vehicle_model: Option<String>,
    pub size: Option<String>,
    pub min_year: Option<i32>,
    pub max_mileage: Option<u32>,
    pub engine_capacity: Option<u32>,
    pub engine_min: Option<u32>,
    pub engine_max: Option<u32>,
    pub sort_by: Option<SortField>,
    pub ascending: Option<bool>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ProductListParams {
    fn criteria(&self) -> FilterCriteria {
        let color_labels: BTreeSet<String> = self
            .colors
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let engine_capacity = match (self.engine_capacity, self.engine_min, self.engine_max) {
            (Some(exact), _, _) => Some(EngineCapacityFilter::Exact(exact)),
            (None, None, None) => None,
            (None, min, max) => Some(EngineCapacityFilter::Range { min, max }),
        };

        FilterCriteria {
            province: self.province.clone(),
            brand: self.brand.clone(),
            condition: self.condition.clone(),
            color_labels,
            product_group: self.group.unwrap_or_default(),
            accessory_type: self.accessory_type.clone(),
            spare_part_type: self.spare_part_type.clone(),
            vehicle_brand: self.vehicle_brand.clone(),
            vehicle_model: self.vehicle_model.clone(),
            size: self.size.clone(),
            min_year: self.min_year,
            max_mileage: self.max_mileage,
            engine_capacity,
        }
    }

    /// The subset the backend can pre-filter. Fuzzy color and the compound
    /// vehicle match stay client-side.
    fn server_query(&self) -> ProductQuery {
        ProductQuery {
            brand: self.brand.clone(),
            location: self.province.clone(),
            condition: self.condition.clone(),
            accessory_type: self.accessory_type.clone(),
            spare_part_type: self.spare_part_type.clone(),
            size: self.size.clone(),
            min_year: self.min_year,
            max_mileage: self.max_mileage,
            sort_by: self.sort_by,
            ascending: self.ascending.unwrap_or(false),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub is_favorited: bool,
}

#[derive(Debug, Serialize)]
pub struct ProductPageResponse {
    pub items: Vec<ListedProduct>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

pub async fn list_products<S: Store>(
    State(state): State<AppState<S>>,
    Query(params): Query<ProductListParams>,
) -> Result<Json<ProductPageResponse>, HandlerError> {
    let products = state
        .store
        .fetch_products(&params.server_query())
        .await
        .map_err(|e| fetch_failed(CatalogError::data_fetch("products", e)))?;

    let criteria = params.criteria();
    let engine = FilterEngine::new(&state.matcher);
    let filtered = engine.apply(&products, &criteria);

    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let total = filtered.len();
    let sliced = paginate(&filtered, page, page_size);

    let items = sliced
        .page_items
        .into_iter()
        .map(|product| ListedProduct {
            is_favorited: state.favorites.is_favorited(&product.id),
            product,
        })
        .collect();

    Ok(Json(ProductPageResponse {
        items,
        total,
        page,
        page_size,
        total_pages: sliced.total_pages,
    }))
}

/// Activate a user session and load their favorites.
pub async fn start_session<S: Store>(
    State(state): State<AppState<S>>,
    Path(user_id): Path<Id>,
) -> Json<FavoriteSet> {
    Json(state.favorites.load(&user_id).await)
}

/// Drop the session to anonymous, clearing local favorite state.
pub async fn end_session<S: Store>(State(state): State<AppState<S>>) -> StatusCode {
    state.favorites.set_anonymous();
    StatusCode::NO_CONTENT
}

pub async fn get_favorites<S: Store>(State(state): State<AppState<S>>) -> Json<FavoriteSet> {
    Json(state.favorites.favorite_set())
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub product_id: Id,
    pub favorited: bool,
}

pub async fn toggle_favorite<S: Store>(
    State(state): State<AppState<S>>,
    Path(product_id): Path<Id>,
) -> Result<Json<ToggleResponse>, HandlerError> {
    let favorited = state
        .favorites
        .toggle(&product_id)
        .await
        .map_err(favorite_failed)?;
    Ok(Json(ToggleResponse {
        product_id,
        favorited,
    }))
}
