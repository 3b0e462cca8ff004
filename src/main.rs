use axum::serve;
use moto_catalog::api::handlers::CatalogState;
use moto_catalog::api::routes::create_router;
use moto_catalog::config::AppConfig;
use moto_catalog::seed;
use moto_catalog::store::MemoryStore;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new().filter_level(LevelFilter::Info).init();

    println!("moto-catalog: marketplace catalog server");

    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}",
        config.server.host, config.server.port
    );

    let store = Arc::new(MemoryStore::new());

    // Load demo catalog data (optional)
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        println!("Loading seed data...");
        seed::load_seed_data(&store);
        println!("Seed data loaded successfully");
    }

    let state = Arc::new(CatalogState::new(store));

    run_server(create_router().with_state(state), &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!("moto-catalog server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
