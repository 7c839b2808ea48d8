//! In-memory reference backend for the accounts REST service
//!
//! Serves the contract the client expects: `GET`/`POST /api/accounts`,
//! `PUT`/`DELETE /api/accounts/:id`, with `{ "data": ... }` envelopes.
//! Data lives only as long as the process.

pub mod error;
pub mod routes;
pub mod store;

use accountdesk_config::Config;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;
pub use store::AccountStore;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<AccountStore>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(AccountStore::new())),
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{api_accounts, api_create_account, api_delete_account, api_update_account};

    let collection = state.config.api.accounts_path.clone();
    let item = format!("{}/:id", collection.trim_end_matches('/'));

    Router::new()
        .route("/api/health", get(health_check))
        .route(&collection, get(api_accounts).post(api_create_account))
        .route(&item, put(api_update_account).delete(api_delete_account))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Bind to the configured address and serve until the process stops
pub async fn start_server(config: Config) -> std::io::Result<()> {
    let addr = config.bind_address();
    let accounts_path = config.api.accounts_path.clone();
    let router = create_router(AppState::new(config));

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting accounts backend on http://{}", addr);
    log::info!("Accounts collection at {}", accounts_path);

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
