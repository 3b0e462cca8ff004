use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::api::handlers::{self, AppState};
use crate::store::Store;

pub fn create_router<S: Store + 'static>() -> Router<AppState<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Navigation tree for the category menu
        .route("/categories/tree", get(handlers::get_category_tree::<S>))
        // Filtered + paginated listing with the favorites overlay
        .route("/products", get(handlers::list_products::<S>))
        // Favorites session lifecycle
        .route("/session/:user_id", post(handlers::start_session::<S>))
        .route("/session", delete(handlers::end_session::<S>))
        .route("/favorites", get(handlers::get_favorites::<S>))
        .route(
            "/favorites/:product_id/toggle",
            post(handlers::toggle_favorite::<S>),
        )
}
