//! Recent and saved searches, persisted as whole-list JSON overwrites.
//!
//! History is a convenience cache: loading never fails. A missing key,
//! unreadable storage or malformed JSON all start from an empty list.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{RECENT_SEARCHES_KEY, RECENT_SEARCH_LIMIT, SAVED_SEARCHES_KEY};
use crate::storage::{load_json, save_json, KeyValueStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Saved search name is required")]
    EmptyName,
    #[error("Saved search not found: {0}")]
    NotFound(String),
    #[error("Search history is not enabled")]
    Unavailable,
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Past free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

/// Named snapshot of a full filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch<F> {
    pub name: String,
    pub filters: F,
}

/// In-memory copy of both lists plus the store they are written through to.
pub struct SearchHistory<F> {
    store: Arc<dyn KeyValueStore>,
    recent: Vec<RecentSearch>,
    saved: Vec<SavedSearch<F>>,
}

impl<F> SearchHistory<F>
where
    F: Clone + Serialize + DeserializeOwned,
{
    /// Load history from the `savedSearches` / `recentSearches` keys.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let saved: Vec<SavedSearch<F>> =
            load_json(store.as_ref(), SAVED_SEARCHES_KEY).unwrap_or_default();
        let mut recent: Vec<RecentSearch> =
            load_json(store.as_ref(), RECENT_SEARCHES_KEY).unwrap_or_default();
        recent.truncate(RECENT_SEARCH_LIMIT);
        tracing::debug!(
            saved = saved.len(),
            recent = recent.len(),
            "Search history loaded"
        );
        Self {
            store,
            recent,
            saved,
        }
    }

    // ── Recent searches ──────────────────────────────────

    /// Most recent first.
    pub fn recent(&self) -> &[RecentSearch] {
        &self.recent
    }

    /// Move `query` to the front (or insert it), capped at the limit.
    /// Entries are kept exactly as typed; whitespace-only queries are ignored.
    pub fn add_recent(&mut self, query: &str) -> Result<(), HistoryError> {
        if query.trim().is_empty() {
            return Ok(());
        }
        self.recent.retain(|r| r.query != query);
        self.recent.insert(
            0,
            RecentSearch {
                query: query.to_string(),
                timestamp: Utc::now(),
            },
        );
        self.recent.truncate(RECENT_SEARCH_LIMIT);
        save_json(self.store.as_ref(), RECENT_SEARCHES_KEY, &self.recent)?;
        Ok(())
    }

    /// Drop every recent search and the stored key.
    pub fn clear_recent(&mut self) -> Result<(), HistoryError> {
        self.recent.clear();
        self.store.remove_item(RECENT_SEARCHES_KEY)?;
        Ok(())
    }

    // ── Saved searches ───────────────────────────────────

    /// Newest first.
    pub fn saved(&self) -> &[SavedSearch<F>] {
        &self.saved
    }

    pub fn find_saved(&self, name: &str) -> Option<&SavedSearch<F>> {
        self.saved.iter().find(|s| s.name == name)
    }

    /// Save under `name`, replacing any entry with the same name.
    pub fn save(&mut self, name: &str, filters: &F) -> Result<(), HistoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HistoryError::EmptyName);
        }
        self.saved.retain(|s| s.name != name);
        self.saved.insert(
            0,
            SavedSearch {
                name: name.to_string(),
                filters: filters.clone(),
            },
        );
        save_json(self.store.as_ref(), SAVED_SEARCHES_KEY, &self.saved)?;
        tracing::info!(name, "Search saved");
        Ok(())
    }

    /// Remove the saved search called `name`. Returns whether one existed.
    pub fn delete_saved(&mut self, name: &str) -> Result<bool, HistoryError> {
        let before = self.saved.len();
        self.saved.retain(|s| s.name != name);
        if self.saved.len() == before {
            return Ok(false);
        }
        save_json(self.store.as_ref(), SAVED_SEARCHES_KEY, &self.saved)?;
        Ok(true)
    }
}
