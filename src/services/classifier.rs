use std::sync::Arc;

use crate::{
    catalog::Catalog,
    models::{ClassificationResult, GenreId, MatchedCategory},
};

/// Confidence reported when no mood category matched
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Total keyword weight at which confidence saturates at 1.0.
///
/// Heuristic, not a calibrated probability.
const CONFIDENCE_SATURATION: f64 = 5.0;

/// Maps free-text mood descriptions to TMDB genres
///
/// Matching is a case-insensitive substring test of each category keyword against the
/// whole text. A category's weight is the number of distinct keywords it matched.
#[derive(Debug, Clone)]
pub struct MoodClassifier {
    catalog: Arc<Catalog>,
}

impl MoodClassifier {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Classifies `text`; never fails, degrading to the fallback genres
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let normalized = text.to_lowercase();
        let mut genre_ids: Vec<GenreId> = Vec::new();
        let mut matched_categories = Vec::new();

        for category in &self.catalog.moods {
            let matched_keywords: Vec<String> = category
                .keywords
                .iter()
                .filter(|keyword| normalized.contains(keyword.as_str()))
                .cloned()
                .collect();

            if matched_keywords.is_empty() {
                continue;
            }

            for id in &category.genre_ids {
                if !genre_ids.contains(id) {
                    genre_ids.push(*id);
                }
            }

            matched_categories.push(MatchedCategory {
                category: category.name.clone(),
                weight: matched_keywords.len(),
                matched_keywords,
            });
        }

        // sort_by is stable: equal weights keep catalog order
        matched_categories.sort_by(|a, b| b.weight.cmp(&a.weight));

        if genre_ids.is_empty() {
            genre_ids = self.catalog.fallback_genres.clone();
        }

        let confidence = if matched_categories.is_empty() {
            FALLBACK_CONFIDENCE
        } else {
            let total: usize = matched_categories.iter().map(|c| c.weight).sum();
            (total as f64 / CONFIDENCE_SATURATION).min(1.0)
        };

        let genre_names = self.catalog.genre_names(&genre_ids);

        tracing::debug!(
            categories = matched_categories.len(),
            genres = ?genre_ids,
            confidence,
            "Mood classified"
        );

        ClassificationResult {
            genre_ids,
            genre_names,
            matched_categories,
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::ImageSizes, models::MoodCategory};
    use std::collections::BTreeMap;

    fn default_classifier() -> MoodClassifier {
        MoodClassifier::new(Arc::new(Catalog::default()))
    }

    fn classifier_with(moods: Vec<MoodCategory>) -> MoodClassifier {
        let genres: BTreeMap<GenreId, String> = [(35, "Comedy"), (18, "Drama"), (28, "Action")]
            .into_iter()
            .map(|(id, name)| (id, name.to_string()))
            .collect();
        MoodClassifier::new(Arc::new(Catalog::new(
            moods,
            genres,
            ImageSizes::default(),
            vec![28, 18, 35],
        )))
    }

    #[test]
    fn test_happy_example() {
        let result = default_classifier().classify("I feel happy and want to laugh");

        assert_eq!(result.genre_ids, vec![35]);
        assert_eq!(result.genre_names, vec!["Comedy".to_string()]);
        assert_eq!(result.matched_categories.len(), 1);
        assert_eq!(result.matched_categories[0].category, "happy");
        assert_eq!(result.matched_categories[0].weight, 2);
        assert_eq!(
            result.matched_categories[0].matched_keywords,
            vec!["happy".to_string(), "laugh".to_string()]
        );
        assert_eq!(result.confidence, 0.4);
    }

    #[test]
    fn test_no_match_uses_fallback() {
        let classifier = default_classifier();
        for text in ["", "   ", "xyzzy plugh", "12345"] {
            let result = classifier.classify(text);
            assert_eq!(result.genre_ids, vec![28, 18, 35]);
            assert_eq!(
                result.genre_names,
                vec!["Action".to_string(), "Drama".to_string(), "Comedy".to_string()]
            );
            assert!(result.is_fallback());
            assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
        }
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = default_classifier();
        let upper = classifier.classify("HAPPY");
        let lower = classifier.classify("happy");
        assert_eq!(upper.genre_ids, lower.genre_ids);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_repeated_keyword_counts_once() {
        let result = default_classifier().classify("happy happy happy");
        assert_eq!(result.matched_categories[0].weight, 1);
        assert_eq!(result.confidence, 0.2);
    }

    #[test]
    fn test_confidence_saturates() {
        let classifier = classifier_with(vec![MoodCategory::new(
            "giddy",
            &["a1", "a2", "a3", "a4", "a5", "a6", "a7"],
            &[35],
        )]);
        let result = classifier.classify("a1 a2 a3 a4 a5 a6 a7");
        assert_eq!(result.total_weight(), 7);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_single_category_weight_k() {
        let classifier = classifier_with(vec![MoodCategory::new(
            "giddy",
            &["k1", "k2", "k3", "k4"],
            &[35],
        )]);
        for k in 1..=4usize {
            let text: Vec<String> = (1..=k).map(|i| format!("k{}", i)).collect();
            let result = classifier.classify(&text.join(" "));
            assert_eq!(result.matched_categories[0].weight, k);
            assert_eq!(result.confidence, (k as f64 / 5.0).min(1.0));
        }
    }

    #[test]
    fn test_genres_deduplicated_in_first_match_order() {
        let classifier = classifier_with(vec![
            MoodCategory::new("first", &["alpha"], &[18, 35]),
            MoodCategory::new("second", &["beta"], &[35, 28]),
        ]);
        let result = classifier.classify("alpha beta");
        assert_eq!(result.genre_ids, vec![18, 35, 28]);
    }

    #[test]
    fn test_categories_sorted_by_weight_stable() {
        let classifier = classifier_with(vec![
            MoodCategory::new("one", &["a"], &[35]),
            MoodCategory::new("two", &["b", "c"], &[18]),
            MoodCategory::new("three", &["d"], &[28]),
        ]);
        let result = classifier.classify("a b c d");
        let order: Vec<&str> = result
            .matched_categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["two", "one", "three"]);
        // genre order follows the catalog, not the weight sort
        assert_eq!(result.genre_ids, vec![35, 18, 28]);
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn test_matched_category_without_genres_falls_back_on_genres_only() {
        let classifier = classifier_with(vec![MoodCategory::new("empty", &["meh"], &[])]);
        let result = classifier.classify("meh");
        assert_eq!(result.genre_ids, vec![28, 18, 35]);
        assert!(!result.is_fallback());
        assert_eq!(result.confidence, 0.2);
    }

    #[test]
    fn test_idempotent() {
        let classifier = default_classifier();
        let text = "A scary mystery on a cozy night";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }
}
