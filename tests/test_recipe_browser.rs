use forkify::{
    BrowserConfig, Controller, ForkifyClient, HashLocation, Location, MemoryStore, RecipeModel,
};
use mockito::{Matcher, Server, ServerGuard};
use std::time::Duration;

const RECIPE_BODY: &str = r#"{
  "status": "success",
  "data": {
    "recipe": {
      "id": "5ed6604591c37cdc054bc886",
      "title": "Spicy Chicken and Pepper Jack Pizza",
      "publisher": "My Baking Addiction",
      "source_url": "http://www.mybakingaddiction.com/spicy-chicken-and-pepper-jack-pizza-recipe/",
      "image_url": "http://forkify-api.herokuapp.com/images/FlatBread21of1a180.jpg",
      "servings": 4,
      "cooking_time": 45,
      "ingredients": [
        { "quantity": 1, "unit": "", "description": "tbsp. Canola or olive oil" },
        { "quantity": 0.5, "unit": "cup", "description": "Chopped sweet onion" },
        { "quantity": null, "unit": "", "description": "Salt and pepper, to taste" }
      ]
    }
  }
}"#;

fn search_body(count: usize) -> String {
    let recipes: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{ "id": "r{i}", "title": "Pizza {i}", "publisher": "Publisher", "image_url": "https://example.com/{i}.jpg" }}"#
            )
        })
        .collect();
    format!(
        r#"{{ "status": "success", "results": {count}, "data": {{ "recipes": [{}] }} }}"#,
        recipes.join(",")
    )
}

fn controller(server: &ServerGuard, location: &HashLocation) -> Controller {
    let client = ForkifyClient::with_base_url(
        format!("{}/api/v2/recipes", server.url()),
        None,
        Duration::from_secs(5),
    );
    let model = RecipeModel::new(Box::new(client), Box::new(MemoryStore::new()), 10).unwrap();
    Controller::new(model, Box::new(location.clone()), &BrowserConfig::default())
}

#[tokio::test]
async fn test_search_and_paginate_over_http() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/recipes")
        .match_query(Matcher::UrlEncoded("search".into(), "pizza".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(23))
        .create_async()
        .await;

    let location = HashLocation::default();
    let mut controller = controller(&server, &location);
    controller.control_search_results("pizza").await;
    mock.assert_async().await;

    assert_eq!(controller.model().state().search.results.len(), 23);
    assert_eq!(controller.model().total_pages(), 3);
    assert!(controller
        .pagination_view()
        .region()
        .text_content()
        .contains("Page 2"));

    controller.control_pagination(3);
    let text = controller.results_view().region().text_content();
    assert!(text.contains("Pizza 22"));
    assert!(!text.contains("Pizza 19"));
    assert!(controller
        .pagination_view()
        .region()
        .text_content()
        .contains("Page 2"));
}

#[tokio::test]
async fn test_show_recipe_and_scale_servings() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v2/recipes/5ed6604591c37cdc054bc886")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RECIPE_BODY)
        .create_async()
        .await;

    let location = HashLocation::new("#5ed6604591c37cdc054bc886");
    let mut controller = controller(&server, &location);
    controller.control_recipe().await;
    mock.assert_async().await;

    let region = controller.recipe_view().region();
    assert!(region
        .text_content()
        .contains("Spicy Chicken and Pepper Jack Pizza"));
    let rendered = region.replacements();

    controller.control_servings(8);
    let region = controller.recipe_view().region();
    let quantities: Vec<String> = region
        .elements()
        .into_iter()
        .filter(|e| e.has_class("recipe__quantity"))
        .map(|e| e.text_content())
        .collect();
    assert_eq!(quantities, vec!["2", "1", ""]);
    assert_eq!(region.replacements(), rendered);
}

#[tokio::test]
async fn test_unknown_recipe_shows_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/v2/recipes/nope")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "status": "fail", "message": "Invalid _id: nope" }"#)
        .create_async()
        .await;

    let location = HashLocation::new("#nope");
    let mut controller = controller(&server, &location);
    controller.control_recipe().await;

    assert!(controller.model().state().recipe.is_none());
    assert!(controller
        .recipe_view()
        .region()
        .text_content()
        .contains("We could not find that recipe"));
    assert_eq!(location.current_id().as_deref(), Some("nope"));
}
