//! Core of a recipe browser: application state backed by a remote recipe
//! API and persisted bookmarks, rendered into regions that are patched in
//! place by a position-paired DOM reconciler.

pub mod api;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod model;
pub mod state;
pub mod store;
pub mod upload;
pub mod views;

pub use api::{ForkifyClient, RecipeApi};
pub use config::{load_config, BrowserConfig};
pub use controller::Controller;
pub use dom::{Patch, Region};
pub use error::{BrowserError, Result};
pub use model::{AppState, Ingredient, Recipe, RecipePreview, SearchState};
pub use state::RecipeModel;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use upload::UploadForm;
pub use views::{HashLocation, Location, UpdateOutcome, View};
