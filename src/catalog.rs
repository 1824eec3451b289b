//! Static configuration table: mood categories, TMDB genre names and image size tiers.
//!
//! The built-in table can be replaced at startup with a JSON file of the same shape
//! (see `Catalog::from_json_file`).
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

use crate::{
    error::AppResult,
    models::{Genre, GenreId, MoodCategory},
};

/// Action, Drama, Comedy
pub const DEFAULT_FALLBACK_GENRES: [GenreId; 3] = [28, 18, 35];

const UNKNOWN_GENRE: &str = "Unknown";

/// Named image width tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
    Original,
}

/// TMDB size codes for one kind of image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeTiers {
    pub small: String,
    pub medium: String,
    pub large: String,
    pub original: String,
}

impl SizeTiers {
    fn new(small: &str, medium: &str, large: &str) -> Self {
        Self {
            small: small.to_string(),
            medium: medium.to_string(),
            large: large.to_string(),
            original: "original".to_string(),
        }
    }

    pub fn get(&self, size: ImageSize) -> &str {
        match size {
            ImageSize::Small => &self.small,
            ImageSize::Medium => &self.medium,
            ImageSize::Large => &self.large,
            ImageSize::Original => &self.original,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageSizes {
    pub poster: SizeTiers,
    pub backdrop: SizeTiers,
    pub profile: SizeTiers,
}

impl Default for ImageSizes {
    fn default() -> Self {
        Self {
            poster: SizeTiers::new("w185", "w342", "w500"),
            backdrop: SizeTiers::new("w300", "w780", "w1280"),
            profile: SizeTiers::new("w45", "w185", "h632"),
        }
    }
}

/// Mood-to-genre mapping and genre metadata, immutable once built
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub moods: Vec<MoodCategory>,
    pub genres: BTreeMap<GenreId, String>,
    #[serde(default)]
    pub image_sizes: ImageSizes,
    #[serde(default = "default_fallback_genres")]
    pub fallback_genres: Vec<GenreId>,
}

fn default_fallback_genres() -> Vec<GenreId> {
    DEFAULT_FALLBACK_GENRES.to_vec()
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(
            default_moods(),
            default_genres(),
            ImageSizes::default(),
            default_fallback_genres(),
        )
    }
}

impl Catalog {
    /// Builds a catalog, lowercasing keywords and dropping empty or repeated ones
    pub fn new(
        moods: Vec<MoodCategory>,
        genres: BTreeMap<GenreId, String>,
        image_sizes: ImageSizes,
        fallback_genres: Vec<GenreId>,
    ) -> Self {
        let moods = moods.into_iter().map(normalize_category).collect();
        Self {
            moods,
            genres,
            image_sizes,
            fallback_genres,
        }
    }

    /// Loads a catalog override from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let parsed: Catalog = serde_json::from_str(&raw)?;

        tracing::info!(
            path = %path.as_ref().display(),
            moods = parsed.moods.len(),
            genres = parsed.genres.len(),
            "Loaded catalog override"
        );

        Ok(Self::new(
            parsed.moods,
            parsed.genres,
            parsed.image_sizes,
            parsed.fallback_genres,
        ))
    }

    pub fn genre_name(&self, id: GenreId) -> &str {
        self.genres.get(&id).map(String::as_str).unwrap_or(UNKNOWN_GENRE)
    }

    pub fn genre_names(&self, ids: &[GenreId]) -> Vec<String> {
        ids.iter().map(|id| self.genre_name(*id).to_string()).collect()
    }

    /// Name of the first genre, "Movie" when there is none or it is unknown
    pub fn primary_genre(&self, ids: &[GenreId]) -> &str {
        ids.first()
            .and_then(|id| self.genres.get(id))
            .map(String::as_str)
            .unwrap_or("Movie")
    }

    /// Genre list in TMDB `/genre/movie/list` shape
    pub fn genre_list(&self) -> Vec<Genre> {
        self.genres
            .iter()
            .map(|(id, name)| Genre {
                id: *id,
                name: name.clone(),
            })
            .collect()
    }
}

fn normalize_category(category: MoodCategory) -> MoodCategory {
    let mut keywords: Vec<String> = Vec::with_capacity(category.keywords.len());
    for keyword in category.keywords {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }

    MoodCategory {
        keywords,
        ..category
    }
}

fn default_moods() -> Vec<MoodCategory> {
    vec![
        MoodCategory::new(
            "happy",
            &["happy", "laugh", "funny", "cheerful", "joy", "silly", "lighthearted", "comedy"],
            &[35],
        ),
        MoodCategory::new(
            "sad",
            &["sad", "cry", "emotional", "heartbroken", "lonely", "tearjerker", "melancholy"],
            &[18],
        ),
        MoodCategory::new(
            "romantic",
            &["love", "romantic", "romance", "date night", "crush", "relationship"],
            &[10749, 18],
        ),
        MoodCategory::new(
            "excited",
            &["excited", "adrenaline", "action", "thrill", "energetic", "pumped", "intense"],
            &[28, 12, 53],
        ),
        MoodCategory::new(
            "scared",
            &["scary", "scared", "horror", "creepy", "spooky", "terrified", "fright"],
            &[27, 53],
        ),
        MoodCategory::new(
            "thoughtful",
            &["think", "thought", "mind", "deep", "philosophical", "curious", "smart"],
            &[878, 9648, 18],
        ),
        MoodCategory::new(
            "adventurous",
            &["adventure", "explore", "journey", "epic", "quest", "travel"],
            &[12, 14],
        ),
        MoodCategory::new(
            "relaxed",
            &["relax", "chill", "calm", "cozy", "easy", "peaceful"],
            &[10751, 16, 35],
        ),
        MoodCategory::new(
            "nostalgic",
            &["nostalgic", "classic", "childhood", "old school", "retro"],
            &[10751, 16, 36],
        ),
        MoodCategory::new(
            "mysterious",
            &["mystery", "mysterious", "puzzle", "detective", "whodunit", "crime"],
            &[9648, 80, 53],
        ),
        MoodCategory::new(
            "inspired",
            &["inspired", "inspiring", "motivated", "uplifting", "hope", "true story"],
            &[18, 36, 99],
        ),
    ]
}

fn default_genres() -> BTreeMap<GenreId, String> {
    [
        (28, "Action"),
        (12, "Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (99, "Documentary"),
        (18, "Drama"),
        (10751, "Family"),
        (14, "Fantasy"),
        (36, "History"),
        (27, "Horror"),
        (10402, "Music"),
        (9648, "Mystery"),
        (10749, "Romance"),
        (878, "Science Fiction"),
        (10770, "TV Movie"),
        (53, "Thriller"),
        (10752, "War"),
        (37, "Western"),
    ]
    .into_iter()
    .map(|(id, name)| (id, name.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_shape() {
        let catalog = Catalog::default();
        assert_eq!(catalog.moods.len(), 11);
        assert_eq!(catalog.genres.len(), 19);
        assert_eq!(catalog.fallback_genres, vec![28, 18, 35]);
        assert_eq!(catalog.moods[0].name, "happy");
    }

    #[test]
    fn test_genre_lookup() {
        let catalog = Catalog::default();
        assert_eq!(catalog.genre_name(35), "Comedy");
        assert_eq!(catalog.genre_name(1), "Unknown");
        assert_eq!(
            catalog.genre_names(&[878, 1]),
            vec!["Science Fiction".to_string(), "Unknown".to_string()]
        );
        assert_eq!(catalog.primary_genre(&[27, 53]), "Horror");
        assert_eq!(catalog.primary_genre(&[]), "Movie");
        assert_eq!(catalog.primary_genre(&[1]), "Movie");
    }

    #[test]
    fn test_keywords_are_normalized() {
        let catalog = Catalog::new(
            vec![MoodCategory::new("loud", &["LOUD", " loud ", "", "Noisy"], &[10402])],
            BTreeMap::new(),
            ImageSizes::default(),
            vec![],
        );
        assert_eq!(catalog.moods[0].keywords, vec!["loud", "noisy"]);
    }

    #[test]
    fn test_size_tiers() {
        let sizes = ImageSizes::default();
        assert_eq!(sizes.poster.get(ImageSize::Medium), "w342");
        assert_eq!(sizes.backdrop.get(ImageSize::Large), "w1280");
        assert_eq!(sizes.profile.get(ImageSize::Original), "original");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "moods": [{{"name": "Spooky", "keywords": ["Ghost"], "genre_ids": [27]}}],
                "genres": {{"27": "Horror"}}
            }}"#
        )
        .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.moods[0].keywords, vec!["ghost"]);
        assert_eq!(catalog.genre_name(27), "Horror");
        assert_eq!(catalog.fallback_genres, vec![28, 18, 35]);
        assert_eq!(catalog.image_sizes, ImageSizes::default());
    }

    #[test]
    fn test_from_json_file_missing() {
        assert!(Catalog::from_json_file("/definitely/not/here.json").is_err());
    }
}
