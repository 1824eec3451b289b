use serde::{Deserialize, Serialize};

use super::GenreId;

/// A named cluster of mood keywords pointing at one or more genres
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodCategory {
    pub name: String,
    /// Matched as lowercase substrings of the mood text
    pub keywords: Vec<String>,
    pub genre_ids: Vec<GenreId>,
}

impl MoodCategory {
    pub fn new(name: &str, keywords: &[&str], genre_ids: &[GenreId]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            genre_ids: genre_ids.to_vec(),
        }
    }
}

/// A mood category that matched the input text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchedCategory {
    pub category: String,
    pub matched_keywords: Vec<String>,
    /// Number of distinct keywords matched
    pub weight: usize,
}

/// Outcome of classifying a mood text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    /// Duplicate-free, in first-match order
    pub genre_ids: Vec<GenreId>,
    pub genre_names: Vec<String>,
    /// Sorted by weight, heaviest first
    pub matched_categories: Vec<MatchedCategory>,
    pub confidence: f64,
}

impl ClassificationResult {
    /// True when no category matched and the default genres were used
    pub fn is_fallback(&self) -> bool {
        self.matched_categories.is_empty()
    }

    pub fn total_weight(&self) -> usize {
        self.matched_categories.iter().map(|c| c.weight).sum()
    }
}
