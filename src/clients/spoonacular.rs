use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::ProviderConfig;

const COMPLEX_SEARCH_PATH: &str = "recipes/complexSearch";

/// Parameters for a `complexSearch` call. The API key is added by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub include_ingredients: Vec<String>,
    pub number: Option<u32>,
    pub add_recipe_information: bool,
    pub fill_ingredients: bool,
    pub instructions_required: bool,
}

impl SearchRequest {
    /// Plain title lookup; only the first hit is used.
    #[must_use]
    pub fn by_title(title: &str) -> Self {
        Self {
            query: Some(title.to_string()),
            ..Default::default()
        }
    }

    /// Detailed search with full recipe information and ingredient lists.
    #[must_use]
    pub const fn detailed(limit: u32) -> Self {
        Self {
            query: None,
            include_ingredients: Vec::new(),
            number: Some(limit),
            add_recipe_information: true,
            fill_ingredients: true,
            instructions_required: true,
        }
    }

    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.include_ingredients = ingredients;
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if self.add_recipe_information {
            pairs.push(("addRecipeInformation", "true".to_string()));
        }
        if self.fill_ingredients {
            pairs.push(("fillIngredients", "true".to_string()));
        }
        if self.instructions_required {
            pairs.push(("instructionsRequired", "true".to_string()));
        }
        if let Some(number) = self.number {
            pairs.push(("number", number.to_string()));
        }
        if !self.include_ingredients.is_empty() {
            pairs.push(("includeIngredients", self.include_ingredients.join(",")));
        }
        if let Some(query) = &self.query {
            pairs.push(("query", query.clone()));
        }

        pairs
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Absent when the provider answers with something other than a result page.
    pub results: Option<Vec<RawRecipe>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecipe {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub source_url: Option<String>,
    pub used_ingredients: Option<Vec<RawIngredient>>,
    pub missed_ingredients: Option<Vec<RawIngredient>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIngredient {
    pub name: String,
}

/// Anything that can answer a recipe search.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn complex_search(&self, request: &SearchRequest) -> Result<SearchResponse>;
}

#[derive(Clone)]
pub struct SpoonacularClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl SpoonacularClient {
    /// Creates a client on top of a shared HTTP client.
    ///
    /// Fails when no API key is configured; there is no built-in fallback key.
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Spoonacular API key is not configured"))?
            .to_string();

        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| anyhow::anyhow!("Failed to parse Spoonacular base URL: {e}"))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn search_url(&self, request: &SearchRequest) -> Result<Url> {
        let mut url = self
            .base_url
            .join(COMPLEX_SEARCH_PATH)
            .map_err(|e| anyhow::anyhow!("Failed to build search URL: {e}"))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apiKey", &self.api_key);
            for (key, value) in request.query_pairs() {
                pairs.append_pair(key, &value);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl RecipeSource for SpoonacularClient {
    async fn complex_search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = self.search_url(request)?;
        tracing::debug!(
            query = ?request.query,
            ingredients = ?request.include_ingredients,
            "Querying Spoonacular"
        );

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Spoonacular API error: {status} - {body}"));
        }

        let response: SearchResponse = response.json().await?;

        Ok(response)
    }
}
