//! Region views: each owns one [`Region`] and decides between a full
//! replace and an incremental update of it.

mod overlay;
mod pagination;
mod preview;
mod recipe;
mod upload;

pub use pagination::{Pagination, PaginationMarkup};
pub use preview::PreviewMarkup;
pub use recipe::{format_quantity, RecipeMarkup};
pub use upload::{FormSlots, UploadMarkup, UploadWindow};

use crate::dom::{Patch, Region};
use crate::error::{BrowserError, Result};
use crate::model::{Recipe, SearchState};
use log::warn;
use std::sync::{Arc, Mutex};

/// Navigation state: which recipe is selected
pub trait Location: Send + Sync {
    fn current_id(&self) -> Option<String>;
    fn push_id(&self, id: &str);
}

/// Location kept as a URL fragment (`#<id>`). Clones share the same fragment.
#[derive(Debug, Clone, Default)]
pub struct HashLocation {
    hash: Arc<Mutex<String>>,
}

impl HashLocation {
    pub fn new(hash: impl Into<String>) -> Self {
        HashLocation {
            hash: Arc::new(Mutex::new(hash.into())),
        }
    }

    pub fn hash(&self) -> String {
        self.hash.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_hash(&self, hash: impl Into<String>) {
        *self.hash.lock().unwrap_or_else(|e| e.into_inner()) = hash.into();
    }
}

impl Location for HashLocation {
    fn current_id(&self) -> Option<String> {
        let hash = self.hash();
        let id = hash.strip_prefix('#').unwrap_or(&hash);
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }

    fn push_id(&self, id: &str) {
        self.set_hash(format!("#{}", id));
    }
}

/// What a markup generator may read besides its data
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Selected recipe id, read from the location at render time
    pub current_id: Option<&'a str>,
    pub icons: &'a str,
}

/// Data a view can be asked to render
pub trait ViewData {
    /// `true` when there is nothing to show
    fn is_empty_data(&self) -> bool;
}

impl<T> ViewData for [T] {
    fn is_empty_data(&self) -> bool {
        self.is_empty()
    }
}

impl ViewData for Recipe {
    fn is_empty_data(&self) -> bool {
        self.id.is_empty()
    }
}

impl ViewData for SearchState {
    fn is_empty_data(&self) -> bool {
        false
    }
}

/// Per-region markup generator
pub trait Markup {
    type Data: ViewData + ?Sized;

    fn generate(&self, data: &Self::Data, ctx: &RenderContext<'_>) -> String;
}

/// Result of an incremental update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Patched(Vec<Patch>),
    /// The new markup did not fit the rendered shape; the region was rebuilt
    Replaced,
}

/// A region together with its markup generator and default messages
pub struct View<M: Markup> {
    region: Region,
    markup: M,
    error_message: String,
    message: String,
    icons: String,
}

impl<M: Markup> View<M> {
    pub fn new(
        name: impl Into<String>,
        markup: M,
        error_message: impl Into<String>,
        message: impl Into<String>,
        icons: impl Into<String>,
    ) -> Self {
        View {
            region: Region::new(name),
            markup,
            error_message: error_message.into(),
            message: message.into(),
            icons: icons.into(),
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn markup(&self) -> &M {
        &self.markup
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    fn generate(&self, data: &M::Data, location: &dyn Location) -> String {
        let current_id = location.current_id();
        let ctx = RenderContext {
            current_id: current_id.as_deref(),
            icons: &self.icons,
        };
        self.markup.generate(data, &ctx)
    }

    /// Replace the region with freshly generated markup.
    /// Fails with [`BrowserError::EmptyData`] when there is nothing to render.
    pub fn render(&mut self, data: &M::Data, location: &dyn Location) -> Result<()> {
        if data.is_empty_data() {
            return Err(BrowserError::EmptyData(self.error_message.clone()));
        }
        let markup = self.generate(data, location);
        self.region.replace(&markup);
        Ok(())
    }

    /// Patch the region in place. `data` must render to the same shape as
    /// what is on screen; if it renders to more elements the region is
    /// rebuilt instead.
    pub fn update(&mut self, data: &M::Data, location: &dyn Location) -> UpdateOutcome {
        let markup = self.generate(data, location);
        match self.region.update(&markup) {
            Ok(patches) => UpdateOutcome::Patched(patches),
            Err(e) => {
                warn!("{}: {}; falling back to full render", self.region.name(), e);
                self.region.replace(&markup);
                UpdateOutcome::Replaced
            }
        }
    }

    pub fn render_spinner(&mut self) {
        self.region.replace(&overlay::spinner(&self.icons));
    }

    /// Show an error overlay, with the region's default message unless one is given.
    pub fn render_error(&mut self, message: Option<&str>) {
        let message = message.unwrap_or(&self.error_message);
        self.region.replace(&overlay::error(&self.icons, message));
    }

    /// Show a message overlay, with the region's default message unless one is given.
    pub fn render_message(&mut self, message: Option<&str>) {
        let message = message.unwrap_or(&self.message);
        self.region.replace(&overlay::message(&self.icons, message));
    }

    pub fn clear(&mut self) {
        self.region.clear();
    }
}
