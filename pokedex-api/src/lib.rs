//! pokedex-api library - HTTP surface of the Pokédex query service
//!
//! GET-only JSON endpoints over the immutable entity and detail tables.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use pokedex_common::{DataStore, StoreHandle};

pub mod api;
pub mod pagination;

use api::ApiError;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Load-once handle to the tables (read-only)
    pub store: Arc<StoreHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<StoreHandle>) -> Self {
        Self { store }
    }

    /// Loaded tables, loading them now if startup did not
    ///
    /// The first load reads and parses files, so it runs on the blocking pool.
    /// Concurrent first requests wait there on the single load.
    pub async fn store(&self) -> Result<&DataStore, ApiError> {
        if !self.store.is_loaded() {
            let handle = Arc::clone(&self.store);
            tokio::task::spawn_blocking(move || handle.get().map(|_| ()))
                .await
                .map_err(|e| ApiError::Internal(format!("Table loading task failed: {}", e)))??;
        }
        self.store.get().map_err(ApiError::from)
    }
}

/// Build application router
///
/// Every route answers GET only; the method guard turns OPTIONS into an
/// empty 200 and anything else into 405. CORS is open to any origin.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    Router::new()
        .route("/api/detail", get(api::get_entity_detail))
        .route("/api/pokemon", get(api::list_pokemon_with_images))
        .route("/api/pokemon/list", get(api::list_pokemon))
        .route("/api/pokemon/:id", get(api::get_pokemon_by_id))
        .route("/api/types", get(api::list_types))
        .route("/api/generations", get(api::list_generations))
        .merge(api::health_routes())
        .layer(middleware::from_fn(api::method_guard))
        .layer(api::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
