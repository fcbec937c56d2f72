//! Recipe metadata source and per-operation cache.

use async_trait::async_trait;

use ifcpipeline_core::error::AppError;
use ifcpipeline_core::result::AppResult;
use ifcpipeline_core::types::RecipeDescriptor;

use crate::discovery;
use crate::http::ApiClient;
use crate::operations::Operation;
use crate::operations::patch::RecipeListRequest;

/// Where recipe metadata comes from.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch built-in and custom recipes in listing order.
    async fn fetch_recipes(&self) -> AppResult<Vec<RecipeDescriptor>>;
}

#[async_trait]
impl RecipeSource for ApiClient {
    async fn fetch_recipes(&self) -> AppResult<Vec<RecipeDescriptor>> {
        let request = Operation::ListRecipes(RecipeListRequest::default()).to_request()?;
        let response = self.send(&request).await?;
        discovery::normalize_recipes(&response)
    }
}

#[derive(Debug, Clone, Default)]
enum CatalogState {
    #[default]
    Empty,
    Loaded(Vec<RecipeDescriptor>),
    Unavailable(AppError),
}

/// Recipe metadata fetched at most once until invalidated.
///
/// One catalog is meant to live for a single logical operation, such as a
/// batch of patch executions, so every item sees the same metadata.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    state: CatalogState,
}

impl RecipeCatalog {
    /// An empty catalog that loads on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch has been attempted since the last invalidation.
    pub fn is_loaded(&self) -> bool {
        !matches!(self.state, CatalogState::Empty)
    }

    /// Drop cached metadata so the next lookup fetches again.
    pub fn invalidate(&mut self) {
        self.state = CatalogState::Empty;
    }

    async fn ensure_loaded<S: RecipeSource + ?Sized>(&mut self, source: &S) {
        if self.is_loaded() {
            return;
        }
        self.state = match source.fetch_recipes().await {
            Ok(recipes) => {
                tracing::debug!(count = recipes.len(), "Loaded recipe catalog");
                CatalogState::Loaded(recipes)
            }
            Err(e) => CatalogState::Unavailable(e),
        };
    }

    /// Cached recipes, fetching them if needed.
    ///
    /// A failed fetch is cached too and returned on every call until
    /// [`invalidate`](Self::invalidate).
    pub async fn recipes<S: RecipeSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> AppResult<&[RecipeDescriptor]> {
        self.ensure_loaded(source).await;
        match &self.state {
            CatalogState::Loaded(recipes) => Ok(recipes),
            CatalogState::Unavailable(e) => Err(e.clone()),
            CatalogState::Empty => Err(AppError::internal("Recipe catalog was not loaded")),
        }
    }

    /// Look up a recipe by exact name.
    pub async fn find<S: RecipeSource + ?Sized>(
        &mut self,
        source: &S,
        name: &str,
    ) -> AppResult<Option<RecipeDescriptor>> {
        let recipes = self.recipes(source).await?;
        Ok(recipes.iter().find(|r| r.name == name).cloned())
    }

    /// Whether `recipe` is a custom script.
    ///
    /// Unknown recipes and unavailable metadata count as built-in, so that
    /// execution is still attempted.
    pub async fn resolve_is_custom<S: RecipeSource + ?Sized>(
        &mut self,
        source: &S,
        recipe: &str,
    ) -> bool {
        match self.find(source, recipe).await {
            Ok(Some(descriptor)) => descriptor.is_custom,
            Ok(None) => {
                tracing::warn!(recipe = %recipe, "Recipe not in catalog; treating it as built-in");
                false
            }
            Err(e) => {
                tracing::warn!(
                    recipe = %recipe,
                    error = %e,
                    "Recipe metadata unavailable; treating it as built-in"
                );
                false
            }
        }
    }
}
