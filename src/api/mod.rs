use axum::{
    Router, middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

mod assets;
mod error;
pub mod favorites;
mod observability;
mod pages;
pub mod recommendations;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn recipes(&self) -> &Arc<crate::services::RecipeService> {
        &self.shared.recipes
    }

    #[must_use]
    pub fn favorites(&self) -> &Arc<crate::services::FavoritesService> {
        &self.shared.favorites
    }

    #[must_use]
    pub fn contacts(&self) -> &Arc<crate::services::ContactService> {
        &self.shared.contacts
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact_form).post(pages::submit_contact))
        .route("/favorites", get(favorites::list_favorites))
        .route("/add_favorite", post(favorites::add_favorite))
        .route("/recommendations", post(recommendations::recommendations))
        .route("/health", get(observability::health))
        .route("/metrics", get(observability::get_metrics))
        .route("/static/{*path}", get(assets::serve_asset))
        .with_state(state)
        .layer(middleware::from_fn(observability::logging_middleware))
        .layer(TraceLayer::new_for_http())
}
