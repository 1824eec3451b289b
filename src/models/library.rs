use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GenreId, Movie, MovieId};

/// Open option map; writes merge shallowly into what is stored
pub type Settings = serde_json::Map<String, serde_json::Value>;

/// A movie the user marked as favorite
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub movie: Movie,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn new(movie: Movie, added_at: DateTime<Utc>) -> Self {
        Self { movie, added_at }
    }

    pub fn id(&self) -> MovieId {
        self.movie.id
    }
}

/// A completed mood search, before the store timestamps it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub mood_text: String,
    pub genre_ids: Vec<GenreId>,
    pub result_count: usize,
}

impl NewHistoryEntry {
    pub fn stamp(self, searched_at: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            mood_text: self.mood_text,
            genre_ids: self.genre_ids,
            result_count: self.result_count,
            searched_at,
        }
    }
}

/// A recorded mood search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mood_text: String,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    #[serde(default)]
    pub result_count: usize,
    pub searched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_entry_flattens_movie() {
        let json = r#"{"id": 13, "title": "Forrest Gump", "genre_ids": [35, 18], "added_at": "2026-01-02T03:04:05Z"}"#;
        let entry: FavoriteEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id(), 13);
        assert_eq!(entry.movie.title, "Forrest Gump");

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 13);
        assert_eq!(value["added_at"], "2026-01-02T03:04:05Z");
    }

    #[test]
    fn test_favorite_entry_requires_timestamp() {
        let json = r#"{"id": 13, "title": "Forrest Gump"}"#;
        assert!(serde_json::from_str::<FavoriteEntry>(json).is_err());
    }

    #[test]
    fn test_stamp_history_entry() {
        let now = Utc::now();
        let entry = NewHistoryEntry {
            mood_text: "cozy night in".to_string(),
            genre_ids: vec![10751, 35],
            result_count: 20,
        }
        .stamp(now);
        assert_eq!(entry.searched_at, now);
        assert_eq!(entry.genre_ids, vec![10751, 35]);
    }
}
