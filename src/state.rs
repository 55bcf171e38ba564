use crate::api::{ApiRecipe, RecipeApi};
use crate::error::{BrowserError, Result};
use crate::model::{AppState, Recipe, RecipePreview, SearchState};
use crate::store::{self, KeyValueStore};
use crate::upload::UploadForm;
use log::{debug, error, info, warn};
use std::collections::HashMap;

/// Owns the application state and every operation that changes it.
///
/// Failed operations leave the state exactly as it was. Bookmark changes are
/// written to the store before they are committed to memory.
pub struct RecipeModel {
    state: AppState,
    api: Box<dyn RecipeApi>,
    store: Box<dyn KeyValueStore>,
    results_per_page: usize,
}

impl RecipeModel {
    /// Create the model, hydrating bookmarks from `store`.
    pub fn new(
        api: Box<dyn RecipeApi>,
        store: Box<dyn KeyValueStore>,
        results_per_page: usize,
    ) -> Result<Self> {
        let bookmarks = store::load_bookmarks(store.as_ref())?;
        Ok(RecipeModel {
            state: AppState::with_bookmarks(bookmarks),
            api,
            store,
            results_per_page: results_per_page.max(1),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn results_per_page(&self) -> usize {
        self.results_per_page
    }

    /// Fetch a recipe without touching state. `bookmarked` reflects the
    /// bookmark set at the time of the call.
    pub async fn fetch_recipe(&self, id: &str) -> Result<Recipe> {
        if id.trim().is_empty() {
            return Err(BrowserError::NotFound(id.to_string()));
        }

        let api_recipe = self.api.get_recipe(id).await.map_err(|e| match e {
            BrowserError::Api { status: 400 | 404, .. } => BrowserError::NotFound(id.to_string()),
            other => other,
        })?;

        if api_recipe.servings == 0 {
            return Err(BrowserError::Format(format!(
                "Recipe {} has no servings to scale from",
                id
            )));
        }

        let mut recipe = Recipe::from(api_recipe);
        recipe.bookmarked = self.state.is_bookmarked(&recipe.id);
        Ok(recipe)
    }

    /// Make `recipe` the current recipe. The bookmark flag is recomputed
    /// against the current bookmark set.
    pub fn apply_recipe(&mut self, mut recipe: Recipe) {
        recipe.bookmarked = self.state.is_bookmarked(&recipe.id);
        debug!("Current recipe is now {} ({})", recipe.id, recipe.title);
        self.state.recipe = Some(recipe);
    }

    pub async fn load_recipe(&mut self, id: &str) -> Result<()> {
        let recipe = self.fetch_recipe(id).await?;
        self.apply_recipe(recipe);
        Ok(())
    }

    /// Replace the search with results for `query`, starting on page 1.
    pub async fn load_search_results(&mut self, query: &str) -> Result<()> {
        let results: Vec<RecipePreview> = self
            .api
            .search(query)
            .await?
            .into_iter()
            .map(RecipePreview::from)
            .collect();

        info!("Search '{}' returned {} result(s)", query, results.len());
        self.state.search = SearchState {
            query: query.to_string(),
            results,
            current_page: 1,
        };
        Ok(())
    }

    /// Slice of results for `page` (default: the current page), which also
    /// becomes the current page. Out-of-range pages give an empty slice.
    ///
    /// Page 0 does not exist; it yields nothing and leaves the current page alone.
    pub fn results_page(&mut self, page: Option<usize>) -> &[RecipePreview] {
        let page = page.unwrap_or(self.state.search.current_page);
        if page == 0 {
            warn!("Ignoring request for search results page 0");
            return &[];
        }
        self.state.search.current_page = page;

        let results = &self.state.search.results;
        let start = (page - 1).saturating_mul(self.results_per_page).min(results.len());
        let end = page.saturating_mul(self.results_per_page).min(results.len());
        &results[start..end]
    }

    pub fn total_pages(&self) -> usize {
        self.state.search.results.len().div_ceil(self.results_per_page)
    }

    /// Rescale every ingredient to `new_servings`. Non-positive values, calls
    /// without a current recipe, and a current recipe with zero servings
    /// change nothing.
    pub fn change_servings(&mut self, new_servings: i64) {
        let Some(recipe) = self.state.recipe.as_mut() else {
            return;
        };
        let new_servings = match u32::try_from(new_servings) {
            Ok(n) if n > 0 => n,
            _ => {
                debug!("Ignoring servings change to {}", new_servings);
                return;
            }
        };

        if recipe.servings == 0 {
            warn!("Recipe {} has no servings to scale from", recipe.id);
            return;
        }

        let old_servings = f64::from(recipe.servings);
        for ingredient in &mut recipe.ingredients {
            if let Some(quantity) = ingredient.quantity.as_mut() {
                *quantity = *quantity * f64::from(new_servings) / old_servings;
            }
        }
        recipe.servings = new_servings;
    }

    /// Add `recipe` to the bookmarks if absent, remove it if present.
    pub fn toggle_bookmark(&mut self, recipe: &Recipe) -> Result<()> {
        let mut bookmarks = self.state.bookmarks.clone();
        let now_bookmarked = match bookmarks.iter().position(|b| b.id == recipe.id) {
            Some(index) => {
                bookmarks.remove(index);
                false
            }
            None => {
                let mut entry = recipe.clone();
                entry.bookmarked = true;
                bookmarks.push(entry);
                true
            }
        };

        self.commit_bookmarks(bookmarks)?;
        if let Some(current) = self.state.recipe.as_mut() {
            if current.id == recipe.id {
                current.bookmarked = now_bookmarked;
            }
        }
        info!(
            "{} bookmark {}",
            if now_bookmarked { "Added" } else { "Removed" },
            recipe.id
        );
        Ok(())
    }

    /// Toggle the bookmark of the current recipe, if any.
    pub fn toggle_current_bookmark(&mut self) -> Result<()> {
        match self.state.recipe.clone() {
            Some(recipe) => self.toggle_bookmark(&recipe),
            None => Ok(()),
        }
    }

    /// Parse `fields`, upload the recipe, and make the stored result the
    /// current, bookmarked recipe.
    pub async fn upload_recipe(&mut self, fields: &HashMap<String, String>) -> Result<()> {
        let form = UploadForm::parse(fields)?;
        let created = self.api.create_recipe(&ApiRecipe::from(form)).await?;

        let mut recipe = Recipe::from(created);
        recipe.bookmarked = true;

        let mut bookmarks = self.state.bookmarks.clone();
        bookmarks.retain(|b| b.id != recipe.id);
        bookmarks.push(recipe.clone());
        self.commit_bookmarks(bookmarks)?;

        info!("Uploaded recipe {} ({})", recipe.id, recipe.title);
        self.state.recipe = Some(recipe);
        Ok(())
    }

    /// Remove a user recipe from the bookmarks and from the remote API.
    ///
    /// The remote delete runs after the local change is persisted; its failure
    /// is logged and otherwise ignored.
    pub async fn delete_bookmarked_recipe(&mut self, id: &str) -> Result<()> {
        let mut bookmarks = self.state.bookmarks.clone();
        bookmarks.retain(|b| b.id != id);
        self.commit_bookmarks(bookmarks)?;
        if let Some(current) = self.state.recipe.as_mut() {
            if current.id == id {
                current.bookmarked = false;
            }
        }

        if let Err(e) = self.api.delete_recipe(id).await {
            error!("Failed to delete recipe {} from the API: {}", id, e);
        }
        Ok(())
    }

    pub fn clear_bookmarks(&mut self) -> Result<()> {
        store::clear_bookmarks(self.store.as_mut())?;
        self.state.bookmarks.clear();
        if let Some(current) = self.state.recipe.as_mut() {
            current.bookmarked = false;
        }
        Ok(())
    }

    pub fn bookmark_previews(&self) -> Vec<RecipePreview> {
        self.state.bookmarks.iter().map(RecipePreview::from).collect()
    }

    fn commit_bookmarks(&mut self, bookmarks: Vec<Recipe>) -> Result<()> {
        store::save_bookmarks(self.store.as_mut(), &bookmarks)?;
        self.state.bookmarks = bookmarks;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use crate::api::ApiPreview;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// In-memory API with canned recipes and switchable failures
    #[derive(Default, Clone)]
    pub struct FakeApi {
        pub recipes: Arc<Mutex<HashMap<String, ApiRecipe>>>,
        pub results: Arc<Mutex<Vec<ApiPreview>>>,
        pub fail: Arc<Mutex<bool>>,
        pub deleted: Arc<Mutex<Vec<String>>>,
    }

    impl FakeApi {
        pub fn with_recipes(recipes: &[Recipe]) -> Self {
            let api = FakeApi::default();
            for recipe in recipes {
                let mut recipe = recipe.clone();
                recipe.bookmarked = false;
                api.recipes
                    .lock()
                    .unwrap()
                    .insert(recipe.id.clone(), ApiRecipe::from(&recipe));
            }
            api
        }

        pub fn set_results(&self, count: usize) {
            *self.results.lock().unwrap() = (0..count)
                .map(|i| ApiPreview {
                    id: format!("r{}", i),
                    title: format!("Result {}", i),
                    publisher: "Publisher".to_string(),
                    image_url: format!("https://example.com/r{}.jpg", i),
                    key: None,
                })
                .collect();
        }

        pub fn set_failing(&self, failing: bool) {
            *self.fail.lock().unwrap() = failing;
        }

        fn check(&self) -> Result<()> {
            if *self.fail.lock().unwrap() {
                return Err(BrowserError::Timeout(10));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RecipeApi for FakeApi {
        async fn get_recipe(&self, id: &str) -> Result<ApiRecipe> {
            self.check()?;
            self.recipes
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| BrowserError::Api {
                    status: 400,
                    message: format!("Invalid _id: {}", id),
                })
        }

        async fn search(&self, _query: &str) -> Result<Vec<ApiPreview>> {
            self.check()?;
            Ok(self.results.lock().unwrap().clone())
        }

        async fn create_recipe(&self, recipe: &ApiRecipe) -> Result<ApiRecipe> {
            self.check()?;
            let mut created = recipe.clone();
            created.id = "uploaded-1".to_string();
            created.key = Some("dev-key".to_string());
            self.recipes
                .lock()
                .unwrap()
                .insert(created.id.clone(), created.clone());
            Ok(created)
        }

        async fn delete_recipe(&self, id: &str) -> Result<()> {
            self.check()?;
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(())
        }
    }
}
