mod forkify;

pub use forkify::{with_timeout, ForkifyClient};

use crate::error::Result;
use crate::model::{Ingredient, Recipe, RecipePreview};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Remote recipe API as seen by the state model
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Fetch a single recipe by id
    async fn get_recipe(&self, id: &str) -> Result<ApiRecipe>;

    /// Search recipes matching `query`
    async fn search(&self, query: &str) -> Result<Vec<ApiPreview>>;

    /// Create a user recipe; returns the stored recipe including its new id and key
    async fn create_recipe(&self, recipe: &ApiRecipe) -> Result<ApiRecipe>;

    /// Delete a user recipe (developer key only)
    async fn delete_recipe(&self, id: &str) -> Result<()>;
}

/// Recipe in the API's own field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRecipe {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub source_url: String,
    pub image_url: String,
    pub servings: u32,
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Search hit in the API's own field names
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiPreview {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
    #[serde(default)]
    pub key: Option<String>,
}

/// `{ "status": "success", "data": { ... } }`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecipeData {
    pub recipe: ApiRecipe,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchData {
    #[serde(default)]
    pub recipes: Vec<ApiPreview>,
}

impl From<ApiRecipe> for Recipe {
    fn from(api: ApiRecipe) -> Self {
        Recipe {
            id: api.id,
            title: api.title,
            publisher: api.publisher,
            image_url: api.image_url,
            source_url: api.source_url,
            cooking_time: api.cooking_time,
            servings: api.servings,
            ingredients: api.ingredients,
            bookmarked: false,
            key: api.key,
        }
    }
}

impl From<&Recipe> for ApiRecipe {
    fn from(recipe: &Recipe) -> Self {
        ApiRecipe {
            id: recipe.id.clone(),
            title: recipe.title.clone(),
            publisher: recipe.publisher.clone(),
            source_url: recipe.source_url.clone(),
            image_url: recipe.image_url.clone(),
            servings: recipe.servings,
            cooking_time: recipe.cooking_time,
            ingredients: recipe.ingredients.clone(),
            key: recipe.key.clone(),
        }
    }
}

impl From<ApiPreview> for RecipePreview {
    fn from(api: ApiPreview) -> Self {
        RecipePreview {
            id: api.id,
            title: api.title,
            publisher: api.publisher,
            image_url: api.image_url,
            key: api.key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn test_api_recipe_uses_external_field_names() {
        let json = r#"{
            "id": "5ed6604591c37cdc054bc886",
            "title": "Spicy Chicken and Pepper Jack Pizza",
            "publisher": "My Baking Addiction",
            "source_url": "http://www.mybakingaddiction.com/spicy-chicken-and-pepper-jack-pizza-recipe/",
            "image_url": "http://forkify-api.herokuapp.com/images/FlatBread21of1a180.jpg",
            "servings": 4,
            "cooking_time": 45,
            "ingredients": [
                {"quantity": 1, "unit": "", "description": "tbsp. canola or olive oil"},
                {"quantity": null, "unit": "", "description": "Salt and pepper"}
            ]
        }"#;

        let recipe: Recipe = serde_json::from_str::<ApiRecipe>(json).unwrap().into();
        assert_eq!(recipe.cooking_time, 45);
        assert_eq!(
            recipe.image_url,
            "http://forkify-api.herokuapp.com/images/FlatBread21of1a180.jpg"
        );
        assert_eq!(recipe.ingredients[0].quantity, Some(1.0));
        assert_eq!(recipe.ingredients[1].quantity, None);
        assert!(!recipe.bookmarked);
        assert!(recipe.key.is_none());
    }

    #[test]
    fn test_app_to_api_translation_is_reversible() {
        let mut recipe = fixtures::recipe("42");
        recipe.key = Some("dev-key".to_string());

        let api = ApiRecipe::from(&recipe);
        let value = serde_json::to_value(&api).unwrap();
        assert_eq!(value["cooking_time"], 45);
        assert_eq!(value["source_url"], "https://example.com/recipes/42");
        assert!(value.get("cookingTime").is_none());

        assert_eq!(Recipe::from(api), recipe);
    }

    #[test]
    fn test_upload_payload_omits_empty_id() {
        let mut recipe = fixtures::recipe("");
        recipe.id.clear();
        let value = serde_json::to_value(ApiRecipe::from(&recipe)).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("key").is_none());
    }
}
