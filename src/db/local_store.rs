use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
};

use super::Storage;
use crate::error::{AppError, AppResult};
use crate::models::{FavoriteEntry, HistoryEntry, Movie, MovieId, NewHistoryEntry, Settings};

pub const FAVORITES_KEY: &str = "moodflix_favorites";
pub const HISTORY_KEY: &str = "moodflix_history";
pub const SETTINGS_KEY: &str = "moodflix_settings";

/// Capacity limits for the persisted collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub max_favorites: usize,
    pub max_history: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_favorites: 50,
            max_history: 20,
        }
    }
}

/// Favorites, search history and settings on top of a `Storage` backend
///
/// The backend is untrusted: reads never fail, and anything unreadable, malformed or
/// violating the collection invariants is repaired on the way in. Write failures are
/// logged and swallowed.
///
/// Mutations are full read-modify-write cycles serialized by an in-process lock.
/// Other processes writing the same backend are last-write-wins.
pub struct LocalStore {
    storage: Arc<dyn Storage>,
    limits: StoreLimits,
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(storage: Arc<dyn Storage>, limits: StoreLimits) -> Self {
        Self {
            storage,
            limits,
            write_lock: Mutex::new(()),
        }
    }

    /// Runs `work` against the store on the blocking thread pool
    ///
    /// Backends may do file or network I/O, so async callers go through here.
    pub async fn blocking<T, F>(self: &Arc<Self>, work: F) -> AppResult<T>
    where
        F: FnOnce(&LocalStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || work(&store))
            .await
            .map_err(|e| AppError::Internal(format!("Store task failed: {}", e)))
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Favorites, newest first
    pub fn get_favorites(&self) -> Vec<FavoriteEntry> {
        let mut seen = HashSet::new();
        let mut favorites: Vec<FavoriteEntry> = self
            .read_list::<FavoriteEntry>(FAVORITES_KEY)
            .into_iter()
            .filter(|entry| seen.insert(entry.id()))
            .collect();
        favorites.truncate(self.limits.max_favorites);
        favorites
    }

    /// Replaces the whole favorites collection
    pub fn save_favorites(&self, favorites: &[FavoriteEntry]) {
        self.write_document(FAVORITES_KEY, &favorites);
    }

    /// Adds `movie` as the newest favorite.
    ///
    /// Returns false when the movie is already a favorite or the collection is full.
    pub fn add_favorite(&self, movie: Movie) -> bool {
        let _guard = self.lock();
        let mut favorites = self.get_favorites();

        if favorites.iter().any(|f| f.id() == movie.id) {
            tracing::debug!(movie_id = movie.id, "Movie already in favorites");
            return false;
        }

        if favorites.len() >= self.limits.max_favorites {
            tracing::warn!(
                movie_id = movie.id,
                max = self.limits.max_favorites,
                "Favorites at capacity"
            );
            return false;
        }

        let movie_id = movie.id;
        favorites.insert(0, FavoriteEntry::new(movie, Utc::now()));
        self.save_favorites(&favorites);

        tracing::info!(movie_id, count = favorites.len(), "Favorite added");
        true
    }

    /// Removes the favorite with `movie_id`; false when there was none
    pub fn remove_favorite(&self, movie_id: MovieId) -> bool {
        let _guard = self.lock();
        let favorites = self.get_favorites();
        let before = favorites.len();
        let remaining: Vec<FavoriteEntry> =
            favorites.into_iter().filter(|f| f.id() != movie_id).collect();

        if remaining.len() == before {
            return false;
        }

        self.save_favorites(&remaining);
        tracing::info!(movie_id, count = remaining.len(), "Favorite removed");
        true
    }

    pub fn is_favorite(&self, movie_id: MovieId) -> bool {
        self.get_favorites().iter().any(|f| f.id() == movie_id)
    }

    pub fn favorites_count(&self) -> usize {
        self.get_favorites().len()
    }

    pub fn clear_favorites(&self) {
        let _guard = self.lock();
        self.save_favorites(&[]);
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Search history, newest first
    pub fn get_history(&self) -> Vec<HistoryEntry> {
        let mut history = self.read_list::<HistoryEntry>(HISTORY_KEY);
        history.truncate(self.limits.max_history);
        history
    }

    /// Replaces the whole history collection
    pub fn save_history(&self, history: &[HistoryEntry]) {
        self.write_document(HISTORY_KEY, &history);
    }

    /// Records a search as the newest entry, evicting the oldest beyond the cap
    pub fn add_to_history(&self, entry: NewHistoryEntry) {
        let _guard = self.lock();
        let mut history = self.get_history();
        history.insert(0, entry.stamp(Utc::now()));

        while history.len() > self.limits.max_history {
            history.pop();
        }

        self.save_history(&history);
    }

    /// Removes the entry at `index` (0 = newest); false when out of range
    pub fn remove_history_entry(&self, index: usize) -> bool {
        let _guard = self.lock();
        let mut history = self.get_history();

        if index >= history.len() {
            return false;
        }

        history.remove(index);
        self.save_history(&history);
        true
    }

    pub fn clear_history(&self) {
        let _guard = self.lock();
        self.save_history(&[]);
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn get_settings(&self) -> Settings {
        match self.read_document(SETTINGS_KEY) {
            Some(Value::Object(settings)) => settings,
            Some(other) => {
                tracing::warn!(
                    key = SETTINGS_KEY,
                    kind = json_kind(&other),
                    "Stored settings are not an object, ignoring"
                );
                Settings::new()
            }
            None => Settings::new(),
        }
    }

    /// Merges `partial` into the stored settings, overwriting keys it names
    pub fn save_settings(&self, partial: Settings) -> Settings {
        let _guard = self.lock();
        let mut settings = self.get_settings();
        settings.extend(partial);
        self.write_document(SETTINGS_KEY, &settings);
        settings
    }

    // ------------------------------------------------------------------
    // Storage boundary
    // ------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read_document(&self, key: &str) -> Option<Value> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    key,
                    backend = self.storage.name(),
                    "Error reading from storage"
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, key, "Stored value is not valid JSON, ignoring");
                None
            }
        }
    }

    /// Reads a JSON array, keeping only the elements that validate as `T`
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let items = match self.read_document(key) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                tracing::warn!(
                    key,
                    kind = json_kind(&other),
                    "Stored collection is not an array, ignoring"
                );
                return Vec::new();
            }
            None => return Vec::new(),
        };

        let total = items.len();
        let valid: Vec<T> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();

        if valid.len() < total {
            tracing::warn!(
                key,
                dropped = total - valid.len(),
                "Dropped malformed entries from stored collection"
            );
        }

        valid
    }

    fn write_document<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, key, "Failed to serialize collection");
                return;
            }
        };

        if let Err(e) = self.storage.set(key, &json) {
            tracing::error!(
                error = %e,
                key,
                backend = self.storage.name(),
                "Error saving to storage"
            );
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
