use serde::Serialize;
use std::sync::Arc;

use crate::{
    db::LocalStore,
    error::{AppError, AppResult},
    models::{ClassificationResult, Movie, MoviePage, NewHistoryEntry},
    services::{classifier::MoodClassifier, providers::MovieProvider},
};

/// Result of a mood search
#[derive(Debug, Clone)]
pub struct MoodSearch {
    pub mood_text: String,
    pub classification: ClassificationResult,
    pub movies: MoviePage,
}

/// What a favorite toggle did
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteToggle {
    Added,
    Removed,
    /// Not a favorite and could not be added (collection full)
    Rejected,
}

/// The "find movies for my mood" flow plus favorite toggling
#[derive(Clone)]
pub struct DiscoveryService {
    classifier: MoodClassifier,
    provider: Arc<dyn MovieProvider>,
    store: Arc<LocalStore>,
}

impl DiscoveryService {
    pub fn new(
        classifier: MoodClassifier,
        provider: Arc<dyn MovieProvider>,
        store: Arc<LocalStore>,
    ) -> Self {
        Self {
            classifier,
            provider,
            store,
        }
    }

    /// Classifies `mood_text` and discovers matching movies.
    ///
    /// A first-page search that finds anything is recorded in the history; later
    /// pages of the same search are not.
    pub async fn find_movies(&self, mood_text: &str, page: u32) -> AppResult<MoodSearch> {
        let mood_text = mood_text.trim();
        if mood_text.is_empty() {
            return Err(AppError::InvalidInput(
                "Please describe your mood first".to_string(),
            ));
        }

        let classification = self.classifier.classify(mood_text);
        let movies = self
            .provider
            .discover_by_genres(&classification.genre_ids, page)
            .await?;

        if movies.results.is_empty() {
            tracing::info!(
                genres = ?classification.genre_ids,
                "No movies found for mood"
            );
        } else if page <= 1 {
            let entry = NewHistoryEntry {
                mood_text: mood_text.to_string(),
                genre_ids: classification.genre_ids.clone(),
                result_count: movies.results.len(),
            };
            self.store
                .blocking(move |store| store.add_to_history(entry))
                .await?;
        }

        tracing::info!(
            genres = ?classification.genre_ids,
            confidence = classification.confidence,
            results = movies.results.len(),
            "Mood search completed"
        );

        Ok(MoodSearch {
            mood_text: mood_text.to_string(),
            classification,
            movies,
        })
    }

    /// Removes `movie` from favorites if present, otherwise adds it
    pub async fn toggle_favorite(&self, movie: Movie) -> AppResult<FavoriteToggle> {
        self.store
            .blocking(move |store| {
                if store.remove_favorite(movie.id) {
                    FavoriteToggle::Removed
                } else if store.add_favorite(movie) {
                    FavoriteToggle::Added
                } else {
                    FavoriteToggle::Rejected
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::Catalog,
        db::{MemoryStorage, StoreLimits},
        models::MovieId,
        services::providers::MockMovieProvider,
    };

    fn movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: None,
            genre_ids: vec![35],
        }
    }

    fn service_with(
        provider: MockMovieProvider,
        limits: StoreLimits,
    ) -> (DiscoveryService, Arc<LocalStore>) {
        let store = Arc::new(LocalStore::new(Arc::new(MemoryStorage::new()), limits));
        let classifier = MoodClassifier::new(Arc::new(Catalog::default()));
        (
            DiscoveryService::new(classifier, Arc::new(provider), store.clone()),
            store,
        )
    }

    fn service(provider: MockMovieProvider) -> (DiscoveryService, Arc<LocalStore>) {
        service_with(provider, StoreLimits::default())
    }

    #[tokio::test]
    async fn test_find_movies_records_history() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_discover_by_genres()
            .withf(|genres, page| genres.to_vec() == vec![35] && *page == 1)
            .times(1)
            .returning(|_, _| Ok(MoviePage::single(vec![movie(1), movie(2)])));

        let (service, store) = service(provider);
        let search = service
            .find_movies("  I feel happy and want to laugh  ", 1)
            .await
            .unwrap();

        assert_eq!(search.mood_text, "I feel happy and want to laugh");
        assert_eq!(search.classification.confidence, 0.4);
        assert_eq!(search.movies.results.len(), 2);

        let history = store.get_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].mood_text, "I feel happy and want to laugh");
        assert_eq!(history[0].genre_ids, vec![35]);
        assert_eq!(history[0].result_count, 2);
    }

    #[tokio::test]
    async fn test_find_movies_without_results_skips_history() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_discover_by_genres()
            .returning(|_, _| Ok(MoviePage::empty(1)));

        let (service, store) = service(provider);
        let search = service.find_movies("something scary", 1).await.unwrap();

        assert!(search.movies.results.is_empty());
        assert!(store.get_history().is_empty());
    }

    #[tokio::test]
    async fn test_later_pages_are_not_new_searches() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_discover_by_genres()
            .returning(|_, _| Ok(MoviePage::single(vec![movie(1)])));

        let (service, store) = service(provider);
        service.find_movies("cozy", 2).await.unwrap();
        assert!(store.get_history().is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_mood_discovers_fallback_genres() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_discover_by_genres()
            .withf(|genres, _| genres.to_vec() == vec![28, 18, 35])
            .times(1)
            .returning(|_, _| Ok(MoviePage::single(vec![movie(1)])));

        let (service, _) = service(provider);
        let search = service.find_movies("qwerty", 1).await.unwrap();
        assert!(search.classification.is_fallback());
    }

    #[tokio::test]
    async fn test_empty_mood_is_rejected_before_fetch() {
        let mut provider = MockMovieProvider::new();
        provider.expect_discover_by_genres().times(0);

        let (service, _) = service(provider);
        assert!(matches!(
            service.find_movies("   ", 1).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_discover_by_genres()
            .returning(|_, _| Err(AppError::ExternalApi("TMDB returned status 503".to_string())));

        let (service, store) = service(provider);
        assert!(matches!(
            service.find_movies("happy", 1).await,
            Err(AppError::ExternalApi(_))
        ));
        assert!(store.get_history().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_favorite() {
        let (service, store) = service_with(
            MockMovieProvider::new(),
            StoreLimits {
                max_favorites: 1,
                max_history: 20,
            },
        );

        assert_eq!(service.toggle_favorite(movie(1)).await.unwrap(), FavoriteToggle::Added);
        assert!(store.is_favorite(1));

        assert_eq!(service.toggle_favorite(movie(2)).await.unwrap(), FavoriteToggle::Rejected);
        assert!(!store.is_favorite(2));

        assert_eq!(service.toggle_favorite(movie(1)).await.unwrap(), FavoriteToggle::Removed);
        assert!(!store.is_favorite(1));
    }
}
