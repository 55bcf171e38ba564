use crate::error::Result;
use crate::model::Recipe;
use log::{debug, info, warn};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key under which the bookmark collection is stored
pub const BOOKMARKS_KEY: &str = "bookmarks";

/// String key-value persistence. Writes are synchronous.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store, lost when dropped
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file. Every write rewrites the file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Written beside the target, then renamed over it
        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_string_pretty(entries)?)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        debug!("Wrote {} key(s) to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Read the bookmark collection. An absent key means no bookmarks.
///
/// Entries repeating an id already seen are dropped.
pub fn load_bookmarks(store: &dyn KeyValueStore) -> Result<Vec<Recipe>> {
    let Some(raw) = store.get(BOOKMARKS_KEY)? else {
        debug!("No stored bookmarks");
        return Ok(Vec::new());
    };

    let stored: Vec<Recipe> = serde_json::from_str(&raw)?;
    let total = stored.len();
    let mut seen = HashSet::new();
    let bookmarks: Vec<Recipe> = stored
        .into_iter()
        .filter(|recipe| seen.insert(recipe.id.clone()))
        .collect();

    if bookmarks.len() != total {
        warn!(
            "Dropped {} duplicate bookmark(s) from storage",
            total - bookmarks.len()
        );
    }
    info!("Loaded {} bookmark(s)", bookmarks.len());
    Ok(bookmarks)
}

pub fn save_bookmarks(store: &mut dyn KeyValueStore, bookmarks: &[Recipe]) -> Result<()> {
    store.set(BOOKMARKS_KEY, serde_json::to_string(bookmarks)?)
}

pub fn clear_bookmarks(store: &mut dyn KeyValueStore) -> Result<()> {
    store.remove(BOOKMARKS_KEY)
}
