//! Favorites flow: duplicate check, title lookup, insert.

use std::sync::Arc;
use tracing::info;

use crate::models::FavoriteRecipe;
use crate::services::recipes::{RecipeError, RecipeService};
use crate::store::{FlatFileStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum FavoriteError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Recipe(#[from] RecipeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddFavoriteOutcome {
    Added(FavoriteRecipe),
    AlreadyPresent,
    NotFound,
}

pub struct FavoritesService {
    store: FlatFileStore,
    recipes: Arc<RecipeService>,
}

impl FavoritesService {
    #[must_use]
    pub const fn new(store: FlatFileStore, recipes: Arc<RecipeService>) -> Self {
        Self { store, recipes }
    }

    pub async fn list(&self) -> Result<Vec<FavoriteRecipe>, StoreError> {
        self.store.run(FlatFileStore::load::<FavoriteRecipe>).await
    }

    /// Saves the first provider match for `title` unless it is already a favorite.
    ///
    /// The submitted title is checked before the lookup; the stored title is
    /// the provider's and is checked again under the table lock.
    pub async fn add(&self, title: &str) -> Result<AddFavoriteOutcome, FavoriteError> {
        let submitted = title.to_string();
        if self
            .store
            .run(move |s| s.contains_favorite(&submitted))
            .await?
        {
            return Ok(AddFavoriteOutcome::AlreadyPresent);
        }

        let recipe = match self.recipes.search_by_title(title).await {
            Ok(recipe) => recipe,
            Err(RecipeError::NotFound) => return Ok(AddFavoriteOutcome::NotFound),
            Err(e) => return Err(e.into()),
        };

        let favorite = FavoriteRecipe::from(recipe);
        let row = favorite.clone();
        let inserted = self.store.run(move |s| s.insert_favorite(row)).await?;

        if !inserted {
            return Ok(AddFavoriteOutcome::AlreadyPresent);
        }

        metrics::counter!("recipebox_favorites_added_total").increment(1);
        info!(title = %favorite.title, "Recipe added to favorites");
        Ok(AddFavoriteOutcome::Added(favorite))
    }
}
