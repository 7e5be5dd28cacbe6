use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::services::RecipeError;
use crate::services::recipes::parse_ingredients;
use crate::views;

use super::favorites::NO_RESULTS;
use super::types::RecommendationForm;
use super::validation::optional_field;
use super::{ApiError, AppState};

pub const MISSING_CRITERIA: &str = "Please provide ingredients or a query";
pub const NO_RECIPES: &str = "No recipes found for the given ingredients.";

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RecommendationForm>,
) -> Result<Response, ApiError> {
    let ingredients = optional_field(form.ingredients).map(|raw| parse_ingredients(&raw));
    let query = optional_field(form.query);

    let results = match state
        .recipes()
        .search_by_ingredients_or_query(ingredients, query)
        .await
    {
        Ok(results) => results,
        Err(RecipeError::MissingCriteria) => return Ok(MISSING_CRITERIA.into_response()),
        Err(RecipeError::NotFound) => return Ok(NO_RESULTS.into_response()),
        Err(e) => return Err(e.into()),
    };

    if results.is_empty() {
        return Ok(NO_RECIPES.into_response());
    }

    Ok(Html(views::recommendations_page(&results)?).into_response())
}
