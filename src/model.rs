use serde::{Deserialize, Serialize};

/// One line of a recipe's ingredient list.
///
/// `quantity` is `None` for ingredients like "salt to taste"; it stays `None`
/// under serving changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub description: String,
}

/// Full recipe as held in application state and in the bookmark store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
    pub source_url: String,
    pub cooking_time: u32,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub bookmarked: bool,
    /// Present only on recipes uploaded with a developer key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Recipe {
    pub fn is_user_generated(&self) -> bool {
        self.key.is_some()
    }

    pub fn preview(&self) -> RecipePreview {
        RecipePreview::from(self)
    }
}

/// Lightweight summary shown in the results and bookmark lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePreview {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl From<&Recipe> for RecipePreview {
    fn from(recipe: &Recipe) -> Self {
        RecipePreview {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            publisher: recipe.publisher.clone(),
            image_url: recipe.image_url.clone(),
            key: recipe.key.clone(),
        }
    }
}

/// The current search: query, all results, and the page being shown.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<RecipePreview>,
    /// 1-based
    pub current_page: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState {
            query: String::new(),
            results: Vec::new(),
            current_page: 1,
        }
    }
}

/// Application state for one browsing session.
///
/// `recipe.bookmarked` mirrors membership of `recipe.id` in `bookmarks`, and
/// `bookmarks` holds at most one entry per id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub recipe: Option<Recipe>,
    pub search: SearchState,
    pub bookmarks: Vec<Recipe>,
}

impl AppState {
    pub fn with_bookmarks(bookmarks: Vec<Recipe>) -> Self {
        AppState {
            bookmarks,
            ..Default::default()
        }
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.id == id)
    }

    pub fn current_recipe_id(&self) -> Option<&str> {
        self.recipe.as_ref().map(|r| r.id.as_str())
    }
}
