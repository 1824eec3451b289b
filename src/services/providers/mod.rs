//! Movie metadata source abstraction
//!
//! The live implementation talks to TMDB; the demo implementation serves a small
//! embedded dataset so the service works without an API key. Both speak TMDB's
//! response shapes.
use crate::{
    error::AppResult,
    models::{Credits, GenreId, GenreList, MovieDetails, MovieId, MoviePage, VideoList},
};

pub mod demo;
pub mod tmdb;

pub use demo::DemoProvider;
pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Popular movies having all of `genre_ids`
    async fn discover_by_genres(&self, genre_ids: &[GenreId], page: u32) -> AppResult<MoviePage>;

    /// Free-text title search
    async fn search_movies(&self, query: &str, page: u32) -> AppResult<MoviePage>;

    /// Currently popular movies
    async fn popular_movies(&self, page: u32) -> AppResult<MoviePage>;

    /// Best-rated movies of all time
    async fn top_rated_movies(&self, page: u32) -> AppResult<MoviePage>;

    /// Full details with credits, videos and similar titles appended
    async fn movie_details(&self, movie_id: MovieId) -> AppResult<MovieDetails>;

    async fn movie_credits(&self, movie_id: MovieId) -> AppResult<Credits>;

    async fn movie_videos(&self, movie_id: MovieId) -> AppResult<VideoList>;

    async fn similar_movies(&self, movie_id: MovieId, page: u32) -> AppResult<MoviePage>;

    async fn recommendations(&self, movie_id: MovieId, page: u32) -> AppResult<MoviePage>;

    /// Genre id/name list
    async fn genres(&self) -> AppResult<GenreList>;

    /// Provider name for logging and health reporting
    fn name(&self) -> &'static str;
}
