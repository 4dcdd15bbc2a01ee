use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::browser_utils;
use crate::browsers::OsKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: u64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub favorite: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_browser_cmd: String,
}

/// The canonical bookmark collection plus user config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkStore {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub config: Config,
    /// Always `max(id) + 1`; recomputed on load, never written out.
    #[serde(skip)]
    next_id: u64,
}

impl Default for BookmarkStore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl BookmarkStore {
    pub fn new(config: Config) -> Self {
        Self {
            bookmarks: Vec::new(),
            config,
            next_id: 1,
        }
    }

    /// Wrap an existing collection, e.g. one edited by hand.
    ///
    /// Fails when the largest id leaves no room for a next one.
    pub fn from_bookmarks(bookmarks: Vec<Bookmark>, config: Config) -> Result<Self> {
        let next_id = match bookmarks.iter().map(|b| b.id).max() {
            None => 1,
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| anyhow!("bookmark id {} leaves no room for new bookmarks", max))?,
        };

        Ok(Self {
            bookmarks,
            config,
            next_id,
        })
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Load the store from `path`.
    ///
    /// A missing file yields a fresh store with the platform's default
    /// browser command, which is written out immediately.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No store at {:?}, creating one", path);
            let config = Config {
                default_browser_cmd: browser_utils::default_open_command(OsKind::current())
                    .to_string(),
            };
            let store = Self::new(config);
            store.save(path)?;
            return Ok(store);
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("could not read {:?}", path))?;
        let parsed: BookmarkStore = serde_json::from_str(&content)
            .with_context(|| format!("could not parse bookmark store {:?}", path))?;
        let store = Self::from_bookmarks(parsed.bookmarks, parsed.config)
            .with_context(|| format!("invalid bookmark store {:?}", path))?;

        debug!(
            "Loaded {} bookmarks from {:?} (next id {})",
            store.len(),
            path,
            store.next_id()
        );
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self).context("could not serialize store")?;
        fs::write(path, content).with_context(|| format!("could not write {:?}", path))?;

        debug!("Saved {} bookmarks to {:?}", self.bookmarks.len(), path);
        Ok(())
    }

    /// Fold one `(name, url)` pair into the collection.
    ///
    /// This is the only place that decides duplicates: an exact URL match
    /// makes the call a no-op, otherwise the pair is appended with the next
    /// id. Returns the id of the new bookmark, if one was added. Once the
    /// id space is used up nothing more is appended.
    pub fn merge(&mut self, name: &str, url: &str) -> Option<u64> {
        if self.bookmarks.iter().any(|b| b.url == url) {
            return None;
        }

        let id = self.next_id;
        let Some(next_id) = id.checked_add(1) else {
            warn!("⚠️  Bookmark ids exhausted, not adding {}", url);
            return None;
        };
        self.bookmarks.push(Bookmark {
            id,
            name: name.to_string(),
            url: url.to_string(),
            favorite: false,
        });
        self.next_id = next_id;
        Some(id)
    }

    /// Merge every pair in order, returning how many were new.
    pub fn merge_all<I, N, U>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (N, U)>,
        N: AsRef<str>,
        U: AsRef<str>,
    {
        let mut added = 0;
        for (name, url) in pairs {
            if self.merge(name.as_ref(), url.as_ref()).is_some() {
                added += 1;
            }
        }
        added
    }

    pub fn get(&self, id: u64) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// Flip the favorite flag of bookmark `id`.
    pub fn toggle_favorite(&mut self, id: u64) -> Option<&Bookmark> {
        let bookmark = self.bookmarks.iter_mut().find(|b| b.id == id)?;
        bookmark.favorite = !bookmark.favorite;
        Some(bookmark)
    }

    /// Bookmarks sorted case-insensitively by name, for display.
    pub fn listing(&self, favorites_only: bool) -> Vec<&Bookmark> {
        let mut items: Vec<&Bookmark> = self
            .bookmarks
            .iter()
            .filter(|b| !favorites_only || b.favorite)
            .collect();
        items.sort_by_cached_key(|b| b.name.to_lowercase());
        items
    }
}
