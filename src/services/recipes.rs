//! Recipe Query Adapter: turns user search criteria into provider requests and
//! normalizes provider records into [`RecipeResult`]s.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::clients::spoonacular::{RawRecipe, RecipeSource, SearchRequest};
use crate::config::ProviderConfig;
use crate::models::RecipeResult;

/// Errors specific to recipe lookups.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("No results found")]
    NotFound,

    #[error("Please provide ingredients or a query")]
    MissingCriteria,

    #[error("Malformed recipe from provider: {0}")]
    MalformedRecipe(String),

    #[error("Recipe provider error: {0}")]
    Provider(String),
}

impl From<anyhow::Error> for RecipeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Provider(err.to_string())
    }
}

/// What a recommendations request searches by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    Ingredients(Vec<String>),
    Query(String),
}

impl SearchCriteria {
    /// Picks ingredients over free text; fails when neither carries anything.
    pub fn resolve(
        ingredients: Option<Vec<String>>,
        query: Option<String>,
    ) -> Result<Self, RecipeError> {
        if let Some(ingredients) = ingredients.filter(|list| !list.is_empty()) {
            return Ok(Self::Ingredients(ingredients));
        }

        match query.map(|q| q.trim().to_string()) {
            Some(q) if !q.is_empty() => Ok(Self::Query(q)),
            _ => Err(RecipeError::MissingCriteria),
        }
    }
}

/// Splits a comma-separated form value into trimmed, non-empty ingredient names.
#[must_use]
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Provider constants needed to normalize raw records.
#[derive(Debug, Clone)]
pub struct NormalizeSettings {
    pub image_base_url: String,
    pub homepage: String,
}

impl From<&ProviderConfig> for NormalizeSettings {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            image_base_url: config.image_base_url.clone(),
            homepage: config.homepage.clone(),
        }
    }
}

/// Absolute image URLs pass through; anything else is a filename under `base`.
#[must_use]
pub fn normalize_image(image: &str, base: &str) -> String {
    if image.is_empty() || image.starts_with("http://") || image.starts_with("https://") {
        return image.to_string();
    }

    if base.ends_with('/') {
        format!("{base}{}", image.trim_start_matches('/'))
    } else {
        format!("{base}/{}", image.trim_start_matches('/'))
    }
}

/// Used ingredients followed by missed ingredients, names only.
///
/// A record lacking either list yields an empty list.
#[must_use]
pub fn collect_ingredients(recipe: &RawRecipe) -> Vec<String> {
    match (&recipe.used_ingredients, &recipe.missed_ingredients) {
        (Some(used), Some(missed)) => used
            .iter()
            .chain(missed.iter())
            .map(|i| i.name.clone())
            .collect(),
        _ => Vec::new(),
    }
}

pub fn normalize(recipe: RawRecipe, settings: &NormalizeSettings) -> Result<RecipeResult, RecipeError> {
    let ingredients = collect_ingredients(&recipe);

    let title = recipe.title.ok_or_else(|| {
        RecipeError::MalformedRecipe(format!(
            "recipe {} has no title",
            recipe.id.map_or_else(|| "<unknown>".to_string(), |id| id.to_string())
        ))
    })?;

    let image = normalize_image(recipe.image.as_deref().unwrap_or_default(), &settings.image_base_url);

    let url = recipe
        .source_url
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| settings.homepage.clone());

    Ok(RecipeResult {
        title,
        image,
        url,
        ingredients,
    })
}

pub struct RecipeService {
    source: Arc<dyn RecipeSource>,
    settings: NormalizeSettings,
    result_limit: u32,
}

impl RecipeService {
    #[must_use]
    pub fn new(source: Arc<dyn RecipeSource>, config: &ProviderConfig) -> Self {
        Self {
            source,
            settings: NormalizeSettings::from(config),
            result_limit: config.result_limit,
        }
    }

    /// Looks a recipe up by title and returns the first hit.
    pub async fn search_by_title(&self, title: &str) -> Result<RecipeResult, RecipeError> {
        let response = self
            .source
            .complex_search(&SearchRequest::by_title(title))
            .await?;

        let first = response
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or(RecipeError::NotFound)?;

        normalize(first, &self.settings)
    }

    /// Runs a detailed search by ingredients or, failing that, by free text.
    ///
    /// `MissingCriteria` is returned before any provider call. An empty vector
    /// means the provider answered with no matches.
    pub async fn search_by_ingredients_or_query(
        &self,
        ingredients: Option<Vec<String>>,
        query: Option<String>,
    ) -> Result<Vec<RecipeResult>, RecipeError> {
        let criteria = SearchCriteria::resolve(ingredients, query)?;
        debug!(?criteria, "Searching recipes");

        let request = match criteria {
            SearchCriteria::Ingredients(list) => {
                SearchRequest::detailed(self.result_limit).with_ingredients(list)
            }
            SearchCriteria::Query(q) => SearchRequest::detailed(self.result_limit).with_query(q),
        };

        let response = self.source.complex_search(&request).await?;
        let raw = response.results.ok_or(RecipeError::NotFound)?;

        let results = raw
            .into_iter()
            .map(|r| normalize(r, &self.settings))
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = results.len(), "Recipe search finished");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::spoonacular::{RawIngredient, SearchResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn settings() -> NormalizeSettings {
        NormalizeSettings::from(&ProviderConfig::default())
    }

    fn ingredients(names: &[&str]) -> Vec<RawIngredient> {
        names
            .iter()
            .map(|n| RawIngredient {
                name: (*n).to_string(),
            })
            .collect()
    }

    struct StubSource {
        response: SearchResponse,
        requests: Mutex<Vec<SearchRequest>>,
    }

    impl StubSource {
        fn new(results: Option<Vec<RawRecipe>>) -> Arc<Self> {
            Arc::new(Self {
                response: SearchResponse { results },
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<SearchRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecipeSource for StubSource {
        async fn complex_search(&self, request: &SearchRequest) -> anyhow::Result<SearchResponse> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.response.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RecipeSource for FailingSource {
        async fn complex_search(&self, _request: &SearchRequest) -> anyhow::Result<SearchResponse> {
            Err(anyhow::anyhow!("Spoonacular API error: 401 Unauthorized"))
        }
    }

    #[test]
    fn test_parse_ingredients() {
        assert_eq!(parse_ingredients("egg, flour"), vec!["egg", "flour"]);
        assert_eq!(parse_ingredients("egg,flour ,  milk"), vec!["egg", "flour", "milk"]);
        assert!(parse_ingredients(" , ").is_empty());
        assert!(parse_ingredients("").is_empty());
    }

    #[test]
    fn test_criteria_precedence() {
        let both = SearchCriteria::resolve(Some(vec!["egg".into()]), Some("cake".into()));
        assert_eq!(both.unwrap(), SearchCriteria::Ingredients(vec!["egg".into()]));

        let query_only = SearchCriteria::resolve(Some(vec![]), Some(" cake ".into()));
        assert_eq!(query_only.unwrap(), SearchCriteria::Query("cake".into()));

        assert!(matches!(
            SearchCriteria::resolve(None, Some("   ".into())),
            Err(RecipeError::MissingCriteria)
        ));
        assert!(matches!(
            SearchCriteria::resolve(None, None),
            Err(RecipeError::MissingCriteria)
        ));
    }

    #[test]
    fn test_normalize_image() {
        let base = "https://spoonacular.com/recipeImages/";
        assert_eq!(
            normalize_image("https://cdn.example/a.jpg", base),
            "https://cdn.example/a.jpg"
        );
        assert_eq!(normalize_image("http://cdn.example/a.jpg", base), "http://cdn.example/a.jpg");
        assert_eq!(
            normalize_image("716429-556x370.jpg", base),
            "https://spoonacular.com/recipeImages/716429-556x370.jpg"
        );
        assert_eq!(
            normalize_image("a.jpg", "https://img.example/base"),
            "https://img.example/base/a.jpg"
        );
        assert_eq!(normalize_image("", base), "");
    }

    #[test]
    fn test_collect_ingredients_order_and_fallback() {
        let full = RawRecipe {
            used_ingredients: Some(ingredients(&["egg", "flour"])),
            missed_ingredients: Some(ingredients(&["sugar"])),
            ..RawRecipe::default()
        };
        assert_eq!(collect_ingredients(&full), vec!["egg", "flour", "sugar"]);

        let partial = RawRecipe {
            used_ingredients: Some(ingredients(&["egg"])),
            ..RawRecipe::default()
        };
        assert!(collect_ingredients(&partial).is_empty());
    }

    #[test]
    fn test_normalize_defaults_url_and_requires_title() {
        let recipe = RawRecipe {
            title: Some("Toast".into()),
            image: Some("toast.jpg".into()),
            ..RawRecipe::default()
        };
        let result = normalize(recipe, &settings()).unwrap();
        assert_eq!(result.url, "https://spoonacular.com/");
        assert_eq!(result.image, "https://spoonacular.com/recipeImages/toast.jpg");
        assert!(result.ingredients.is_empty());

        let untitled = RawRecipe {
            id: Some(42),
            ..RawRecipe::default()
        };
        let err = normalize(untitled, &settings()).unwrap_err();
        assert!(matches!(err, RecipeError::MalformedRecipe(msg) if msg.contains("42")));
    }

    #[tokio::test]
    async fn test_search_by_title_takes_first_result() {
        let source = StubSource::new(Some(vec![
            RawRecipe {
                title: Some("Apple Pie".into()),
                image: Some("https://img.example/pie.jpg".into()),
                source_url: Some("https://example.com/pie".into()),
                ..RawRecipe::default()
            },
            RawRecipe {
                title: Some("Apple Crumble".into()),
                ..RawRecipe::default()
            },
        ]));
        let service = RecipeService::new(source.clone(), &ProviderConfig::default());

        let result = service.search_by_title("apple pie").await.unwrap();
        assert_eq!(result.title, "Apple Pie");
        assert_eq!(result.url, "https://example.com/pie");

        let requests = source.requests();
        assert_eq!(requests, vec![SearchRequest::by_title("apple pie")]);
    }

    #[tokio::test]
    async fn test_search_by_title_not_found() {
        let empty = StubSource::new(Some(vec![]));
        let service = RecipeService::new(empty, &ProviderConfig::default());
        assert!(matches!(
            service.search_by_title("nothing").await,
            Err(RecipeError::NotFound)
        ));

        let missing = StubSource::new(None);
        let service = RecipeService::new(missing, &ProviderConfig::default());
        assert!(matches!(
            service.search_by_title("nothing").await,
            Err(RecipeError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_missing_criteria_makes_no_call() {
        let source = StubSource::new(Some(vec![]));
        let service = RecipeService::new(source.clone(), &ProviderConfig::default());

        let err = service
            .search_by_ingredients_or_query(None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RecipeError::MissingCriteria));
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_ingredient_search_concatenates_lists() {
        let source = StubSource::new(Some(vec![RawRecipe {
            title: Some("Pancakes".into()),
            image: Some("pancakes.jpg".into()),
            source_url: Some("https://example.com/pancakes".into()),
            used_ingredients: Some(ingredients(&["egg", "flour"])),
            missed_ingredients: Some(ingredients(&["milk"])),
            ..RawRecipe::default()
        }]));
        let service = RecipeService::new(source.clone(), &ProviderConfig::default());

        let results = service
            .search_by_ingredients_or_query(Some(parse_ingredients("egg, flour")), Some("cake".into()))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ingredients, vec!["egg", "flour", "milk"]);

        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].include_ingredients, vec!["egg", "flour"]);
        assert_eq!(requests[0].query, None);
        assert_eq!(requests[0].number, Some(10));
        assert!(requests[0].fill_ingredients);
    }

    #[tokio::test]
    async fn test_query_search_and_empty_results() {
        let source = StubSource::new(Some(vec![]));
        let service = RecipeService::new(source.clone(), &ProviderConfig::default());

        let results = service
            .search_by_ingredients_or_query(None, Some("soup".into()))
            .await
            .unwrap();
        assert!(results.is_empty());
        assert_eq!(source.requests()[0].query.as_deref(), Some("soup"));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces() {
        let service = RecipeService::new(Arc::new(FailingSource), &ProviderConfig::default());
        let err = service.search_by_title("x").await.unwrap_err();
        assert!(matches!(err, RecipeError::Provider(msg) if msg.contains("401")));
    }
}
