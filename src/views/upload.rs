use super::{Markup, RenderContext, View, ViewData};
use html_escape::encode_double_quoted_attribute as attr;
use log::warn;
use std::time::Duration;
use tokio::time::Instant;

/// Number of ingredient slots offered by the upload form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSlots(pub usize);

impl Default for FormSlots {
    fn default() -> Self {
        FormSlots(6)
    }
}

impl ViewData for FormSlots {
    fn is_empty_data(&self) -> bool {
        false
    }
}

/// The "add recipe" form, with three fields per ingredient slot
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadMarkup;

impl Markup for UploadMarkup {
    type Data = FormSlots;

    fn generate(&self, slots: &FormSlots, ctx: &RenderContext<'_>) -> String {
        let ingredients: String = (1..=slots.0)
            .map(|n| {
                format!(
                    r#"
          <label>Ingredient {n}</label>
          <input type="text" name="ingredient-{n}-quantity" placeholder="Quantity" />
          <input type="text" name="ingredient-{n}-unit" placeholder="Unit" />
          <input type="text" name="ingredient-{n}-description" placeholder="Description" />"#
                )
            })
            .collect();

        format!(
            r#"
      <div class="upload__column">
        <h3 class="upload__heading">Recipe data</h3>
        <label>Title</label>
        <input required name="title" type="text" />
        <label>URL</label>
        <input required name="sourceUrl" type="text" />
        <label>Image URL</label>
        <input required name="image" type="text" />
        <label>Publisher</label>
        <input required name="publisher" type="text" />
        <label>Prep time</label>
        <input required name="cookingTime" type="number" />
        <label>Servings</label>
        <input required name="servings" type="number" />
      </div>
      <div class="upload__column">
        <h3 class="upload__heading">Ingredients</h3>{ingredients}
      </div>
      <button class="btn upload__btn">
        <svg>
          <use href="{icons}#icon-upload-cloud"></use>
        </svg>
        <span>Upload</span>
      </button>"#,
            icons = attr(ctx.icons),
        )
    }
}

/// The upload modal: its form region and whether it is showing.
///
/// After a successful upload the window shows a message and closes itself
/// once `close_after` has passed.
pub struct UploadWindow {
    view: View<UploadMarkup>,
    open: bool,
    closes_at: Option<Instant>,
    close_after: Duration,
}

impl UploadWindow {
    pub fn new(icons: impl Into<String>, close_after: Duration) -> Self {
        UploadWindow {
            view: View::new(
                "upload",
                UploadMarkup,
                "Could not upload the recipe. Please check the form and try again.",
                "Success!",
                icons,
            ),
            open: false,
            closes_at: None,
            close_after,
        }
    }

    pub fn view(&self) -> &View<UploadMarkup> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View<UploadMarkup> {
        &mut self.view
    }

    pub fn is_open(&self) -> bool {
        match self.closes_at {
            Some(at) => self.open && Instant::now() < at,
            None => self.open,
        }
    }

    /// Open the window with a blank form.
    pub fn open(&mut self, slots: FormSlots, location: &dyn super::Location) {
        if let Err(e) = self.view.render(&slots, location) {
            warn!("Could not render the upload form: {}", e);
            self.view.render_error(None);
        }
        self.open = true;
        self.closes_at = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.closes_at = None;
    }

    /// Show the success message and schedule the window to close.
    pub fn successful_upload(&mut self) {
        self.view.render_message(None);
        self.closes_at = Some(Instant::now() + self.close_after);
    }
}
