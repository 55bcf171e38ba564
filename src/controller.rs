use crate::config::BrowserConfig;
use crate::error::BrowserError;
use crate::model::RecipePreview;
use crate::state::RecipeModel;
use crate::views::{
    FormSlots, Location, PaginationMarkup, PreviewMarkup, RecipeMarkup, UploadWindow, View,
};
use log::{debug, error, info, warn};
use std::collections::HashMap;

/// Connects the model to the region views.
///
/// Every operation that waits on the network shows a spinner first and ends
/// with either rendered data or an error overlay; no error escapes.
pub struct Controller {
    model: RecipeModel,
    location: Box<dyn Location>,
    recipe: View<RecipeMarkup>,
    results: View<PreviewMarkup>,
    pagination: View<PaginationMarkup>,
    bookmarks: View<PreviewMarkup>,
    upload: UploadWindow,
}

impl Controller {
    pub fn new(model: RecipeModel, location: Box<dyn Location>, config: &BrowserConfig) -> Self {
        let icons = config.icons_url.clone();
        let results_per_page = model.results_per_page();
        Controller {
            model,
            location,
            recipe: View::new(
                "recipe",
                RecipeMarkup,
                "We could not find that recipe. Please try another one!",
                "Start by searching for a recipe or an ingredient. Have fun!",
                icons.clone(),
            ),
            results: View::new(
                "results",
                PreviewMarkup,
                "Couldn't find recipes matching your search. Sorry! Please try something else.",
                "",
                icons.clone(),
            ),
            pagination: View::new(
                "pagination",
                PaginationMarkup { results_per_page },
                "",
                "",
                icons.clone(),
            ),
            bookmarks: View::new(
                "bookmarks",
                PreviewMarkup,
                "No bookmarks yet. Find a nice recipe and bookmark it :)",
                "",
                icons.clone(),
            ),
            upload: UploadWindow::new(icons, config.modal_close_duration()),
        }
    }

    pub fn model(&self) -> &RecipeModel {
        &self.model
    }

    pub fn location(&self) -> &dyn Location {
        self.location.as_ref()
    }

    pub fn recipe_view(&self) -> &View<RecipeMarkup> {
        &self.recipe
    }

    pub fn results_view(&self) -> &View<PreviewMarkup> {
        &self.results
    }

    pub fn pagination_view(&self) -> &View<PaginationMarkup> {
        &self.pagination
    }

    pub fn bookmarks_view(&self) -> &View<PreviewMarkup> {
        &self.bookmarks
    }

    pub fn upload_window(&self) -> &UploadWindow {
        &self.upload
    }

    /// Show the recipe selected in the location.
    ///
    /// A response that arrives after the location moved on to another id is
    /// dropped, so overlapping loads cannot leave a stale recipe on screen.
    pub async fn control_recipe(&mut self) {
        let Some(id) = self.location.current_id() else {
            return;
        };
        self.recipe.render_spinner();

        // Move the active highlight in the lists
        let page = self.model.results_page(None).to_vec();
        self.results.update(&page, self.location.as_ref());
        let bookmarks = self.model.bookmark_previews();
        self.bookmarks.update(&bookmarks, self.location.as_ref());

        let recipe = match self.model.fetch_recipe(&id).await {
            Ok(recipe) => recipe,
            Err(e) => {
                warn!("Failed to load recipe {}: {}", id, e);
                self.recipe.render_error(None);
                return;
            }
        };

        let current = self.location.current_id();
        if current.as_deref() != Some(id.as_str()) {
            info!("Discarding recipe {} loaded after navigation moved on", id);
            // The newer selection may already be loaded; otherwise its own
            // load replaces the spinner
            let loaded = self.model.state().current_recipe_id();
            if current.is_some() && current.as_deref() == loaded {
                self.render_recipe();
            }
            return;
        }
        self.model.apply_recipe(recipe);
        self.render_recipe();
    }

    /// Search for `query` and show the first page of results.
    pub async fn control_search_results(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.results.render_spinner();

        if let Err(e) = self.model.load_search_results(query).await {
            warn!("Search '{}' failed: {}", query, e);
            self.results.render_error(None);
            self.pagination.clear();
            return;
        }
        self.render_page(None);
    }

    pub fn control_pagination(&mut self, page: usize) {
        debug!("Going to results page {}", page);
        self.render_page(Some(page));
    }

    /// Handle a click inside the pagination region.
    pub fn control_pagination_click(&mut self, element: usize) {
        if let Some(page) = self.pagination.target_page(element) {
            self.control_pagination(page);
        }
    }

    pub fn control_servings(&mut self, servings: i64) {
        if servings <= 0 {
            return;
        }
        self.model.change_servings(servings);
        if let Some(recipe) = self.model.state().recipe.as_ref() {
            self.recipe.update(recipe, self.location.as_ref());
        }
    }

    /// Handle a click inside the recipe region (servings and bookmark buttons).
    pub fn control_recipe_click(&mut self, element: usize) {
        if let Some(servings) = self.recipe.target_servings(element) {
            self.control_servings(servings);
        } else if self.recipe.is_bookmark_click(element) {
            self.control_toggle_bookmark();
        }
    }

    pub fn control_toggle_bookmark(&mut self) {
        if let Err(e) = self.model.toggle_current_bookmark() {
            error!("Failed to save bookmarks: {}", e);
            self.bookmarks.render_error(Some(&e.to_string()));
            return;
        }
        if let Some(recipe) = self.model.state().recipe.as_ref() {
            self.recipe.update(recipe, self.location.as_ref());
        }
        self.render_bookmarks();
    }

    pub fn control_bookmarks(&mut self) {
        self.render_bookmarks();
    }

    pub fn control_open_upload(&mut self) {
        self.upload
            .open(FormSlots::default(), self.location.as_ref());
    }

    /// Upload a recipe from submitted form fields.
    pub async fn control_add_recipe(&mut self, fields: &HashMap<String, String>) {
        self.upload.view_mut().render_spinner();

        if let Err(e) = self.model.upload_recipe(fields).await {
            error!("Upload failed: {}", e);
            self.upload.view_mut().render_error(Some(&e.to_string()));
            return;
        }

        self.render_recipe();
        self.upload.successful_upload();
        self.render_bookmarks();
        if let Some(id) = self.model.state().current_recipe_id() {
            self.location.push_id(id);
        }
    }

    fn render_recipe(&mut self) {
        let Some(recipe) = self.model.state().recipe.as_ref() else {
            self.recipe.render_error(None);
            return;
        };
        if let Err(e) = self.recipe.render(recipe, self.location.as_ref()) {
            debug!("{}", e);
            self.recipe.render_error(None);
        }
    }

    fn render_page(&mut self, page: Option<usize>) {
        let previews: Vec<RecipePreview> = self.model.results_page(page).to_vec();
        match self.results.render(&previews, self.location.as_ref()) {
            Ok(()) => {}
            Err(BrowserError::EmptyData(message)) => self.results.render_error(Some(&message)),
            Err(e) => self.results.render_error(Some(&e.to_string())),
        }
        // Never empty; an empty search simply renders no buttons
        let _ = self
            .pagination
            .render(&self.model.state().search, self.location.as_ref());
    }

    fn render_bookmarks(&mut self) {
        let bookmarks = self.model.bookmark_previews();
        if let Err(e) = self.bookmarks.render(&bookmarks, self.location.as_ref()) {
            debug!("{}", e);
            self.bookmarks.render_error(None);
        }
    }
}
