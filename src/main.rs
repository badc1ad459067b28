//! Newsdesk - A lightweight news management backend

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk::{
    api::{self, AppState},
    cache::create_cache,
    config::Config,
    db::{
        create_store,
        repositories::{MemoryCategoryRepository, MemoryNewsRepository, MemoryUserRepository},
    },
    services::{CategoryService, NewsService, UserService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting newsdesk...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize store and cache
    let store = create_store();
    let cache = create_cache(&config.cache);
    tracing::info!(ttl_seconds = config.cache.ttl_seconds, "Cache initialized");

    // Initialize services
    let user_service = Arc::new(UserService::new(
        MemoryUserRepository::boxed(store.clone()),
        config.auth.token.clone(),
    ));
    let news_service = Arc::new(NewsService::new(
        MemoryNewsRepository::boxed(store.clone()),
        cache.clone(),
    ));
    let category_service = Arc::new(CategoryService::new(
        MemoryCategoryRepository::boxed(store),
        cache,
    ));

    // Seed accounts and categories
    for seed in &config.auth.seed_users {
        if user_service.ensure_user(&seed.email, &seed.password).await? {
            tracing::info!(email = %seed.email, "Seeded account");
        }
    }
    let seeded = category_service.seed(&config.seed.categories).await?;
    let users = user_service.count().await?;
    let news = news_service.count().await?;
    let categories = category_service.count().await?;
    tracing::info!(seeded, users, news, categories, "Store initialized");

    let state = AppState {
        user_service,
        news_service,
        category_service,
    };

    // Build router
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
