pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export error taxonomy
pub use error::{CatalogError, FavoriteError};

// Export logic types
pub use logic::{
    paginate, reduce, CategoryForest, CategoryTreeBuilder, ColorMatcher, FavoritesSynchronizer,
    FilterAction, FilterEngine, FilterState, OrphanCategory, Page, DEFAULT_PAGE_SIZE,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{CategoryStore, FavoriteStore, MemoryStore, ProductStore, Store};

// Function for integration testing
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level only (suppress DEBUG logs)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    // Load configuration
    let config = crate::config::AppConfig::load()?;

    let store = Arc::new(crate::store::MemoryStore::new());
    crate::seed::load_seed_data(&store);

    let state = Arc::new(crate::api::handlers::CatalogState::new(store));
    let app = crate::api::routes::create_router().with_state(state);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;

    serve(listener, app).await?;

    Ok(())
}
