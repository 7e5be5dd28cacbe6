use axum::{Form, extract::State, response::Html};
use std::sync::Arc;
use tracing::debug;

use crate::services::AddFavoriteOutcome;
use crate::views;

use super::types::FavoriteForm;
use super::validation::require_field;
use super::{ApiError, AppState};

pub const ALREADY_IN_FAVORITES: &str = "Recipe already in favorites";
pub const NO_RESULTS: &str = "No results found";
pub const ADDED_TO_FAVORITES: &str = "Recipe added to favorites";

pub async fn list_favorites(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let favorites = state.favorites().list().await?;
    debug!(count = favorites.len(), "Rendering favorites");

    Ok(Html(views::favorites_page(&favorites)?))
}

pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FavoriteForm>,
) -> Result<&'static str, ApiError> {
    let title = require_field("title", form.title)?;

    let reply = match state.favorites().add(&title).await? {
        AddFavoriteOutcome::Added(_) => ADDED_TO_FAVORITES,
        AddFavoriteOutcome::AlreadyPresent => ALREADY_IN_FAVORITES,
        AddFavoriteOutcome::NotFound => NO_RESULTS,
    };

    Ok(reply)
}
