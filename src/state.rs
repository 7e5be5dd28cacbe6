use std::sync::Arc;

use crate::clients::spoonacular::{RecipeSource, SpoonacularClient};
use crate::config::Config;
use crate::services::{ContactService, FavoritesService, RecipeService};
use crate::store::FlatFileStore;

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("recipebox/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub store: FlatFileStore,

    pub recipes: Arc<RecipeService>,

    pub favorites: Arc<FavoritesService>,

    pub contacts: Arc<ContactService>,
}

impl SharedState {
    /// Wires the Spoonacular client and CSV store from `config`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.provider.request_timeout_seconds.into())?;
        let source = Arc::new(SpoonacularClient::with_shared_client(
            http_client,
            &config.provider,
        )?);

        Self::with_source(config, source)
    }

    /// Same as [`SharedState::new`] with a caller-supplied recipe source.
    pub fn with_source(config: &Config, source: Arc<dyn RecipeSource>) -> anyhow::Result<Self> {
        let store = FlatFileStore::new(config.data_dir());
        store.initialize()?;

        let recipes = Arc::new(RecipeService::new(source, &config.provider));
        let favorites = Arc::new(FavoritesService::new(store.clone(), recipes.clone()));
        let contacts = Arc::new(ContactService::new(store.clone()));

        Ok(Self {
            store,
            recipes,
            favorites,
            contacts,
        })
    }
}
