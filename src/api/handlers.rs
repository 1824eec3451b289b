use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::ImageSize;
use crate::error::{AppError, AppResult};
use crate::models::{
    CastMember, ClassificationResult, Credits, GenreList, HistoryEntry, Movie, MovieDetails,
    MovieId, MoviePage, Settings, VideoList,
};
use crate::services::FavoriteToggle;

use super::AppState;

// Request/Response types

fn first_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MoodSearchRequest {
    pub mood: String,
    #[serde(default = "first_page")]
    pub page: u32,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: u32,
}

#[derive(Debug, Deserialize)]
pub struct TitleSearchQuery {
    pub q: String,
    #[serde(default = "first_page")]
    pub page: u32,
}

/// A movie with the display fields a result card needs
#[derive(Debug, Serialize)]
pub struct MovieCard {
    #[serde(flatten)]
    pub movie: Movie,
    pub poster_url: String,
    pub year: String,
    pub rating: String,
    pub primary_genre: String,
    pub is_favorite: bool,
}

/// A favorite rendered like any other result card
#[derive(Debug, Serialize)]
pub struct FavoriteCard {
    #[serde(flatten)]
    pub card: MovieCard,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CastCard {
    #[serde(flatten)]
    pub member: CastMember,
    pub profile_url: String,
}

#[derive(Debug, Serialize)]
pub struct MoodSearchResponse {
    pub mood: String,
    pub classification: ClassificationResult,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub movies: Vec<MovieCard>,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailsResponse {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub poster_url: String,
    pub backdrop_url: String,
    pub year: String,
    pub rating: String,
    pub runtime_text: String,
    pub trailer_url: Option<String>,
    /// Leading billed cast with photo URLs
    pub cast: Vec<CastCard>,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct FavoriteStatus {
    pub id: MovieId,
    pub favorite: bool,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: MovieId,
    pub result: FavoriteToggle,
    pub favorite: bool,
}

/// How many cast members the details view shows
const DETAILS_CAST_LIMIT: usize = 6;

impl AppState {
    fn movie_card(&self, movie: Movie, is_favorite: bool) -> MovieCard {
        MovieCard {
            poster_url: self.images.poster(movie.poster_path.as_deref(), ImageSize::Medium),
            year: movie.year(),
            rating: movie.formatted_rating(),
            primary_genre: self.catalog().primary_genre(&movie.genre_ids).to_string(),
            is_favorite,
            movie,
        }
    }

    async fn movie_cards(&self, movies: Vec<Movie>) -> AppResult<Vec<MovieCard>> {
        let favorites = self
            .store
            .blocking(|store| {
                store
                    .get_favorites()
                    .iter()
                    .map(|f| f.id())
                    .collect::<HashSet<MovieId>>()
            })
            .await?;

        Ok(movies
            .into_iter()
            .map(|movie| {
                let is_favorite = favorites.contains(&movie.id);
                self.movie_card(movie, is_favorite)
            })
            .collect())
    }

    fn cast_cards(&self, details: &MovieDetails) -> Vec<CastCard> {
        details
            .credits
            .iter()
            .flat_map(|credits| credits.cast.iter().take(DETAILS_CAST_LIMIT))
            .map(|member| CastCard {
                profile_url: self
                    .images
                    .profile(member.profile_path.as_deref(), ImageSize::Medium),
                member: member.clone(),
            })
            .collect()
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "provider": state.provider.name(),
    }))
}

/// Classify a mood text without fetching movies
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Json<ClassificationResult> {
    Json(state.classifier.classify(&request.text))
}

/// Find movies matching a mood
pub async fn search_by_mood(
    State(state): State<AppState>,
    Json(request): Json<MoodSearchRequest>,
) -> AppResult<Json<MoodSearchResponse>> {
    let search = state.discovery.find_movies(&request.mood, request.page).await?;

    Ok(Json(MoodSearchResponse {
        mood: search.mood_text,
        classification: search.classification,
        page: search.movies.page,
        total_pages: search.movies.total_pages,
        total_results: search.movies.total_results,
        movies: state.movie_cards(search.movies.results).await?,
    }))
}

/// Search movies by title
pub async fn search_titles(
    State(state): State<AppState>,
    Query(params): Query<TitleSearchQuery>,
) -> AppResult<Json<MoviePage>> {
    let movies = state.provider.search_movies(&params.q, params.page).await?;
    Ok(Json(movies))
}

pub async fn popular_movies(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<MoviePage>> {
    Ok(Json(state.provider.popular_movies(params.page).await?))
}

pub async fn top_rated_movies(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<MoviePage>> {
    Ok(Json(state.provider.top_rated_movies(params.page).await?))
}

/// Full movie details
pub async fn movie_details(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<MovieDetailsResponse>> {
    let details = state.provider.movie_details(movie_id).await?;
    let is_favorite = state
        .store
        .blocking(move |store| store.is_favorite(movie_id))
        .await?;
    let movie = &details.movie;

    Ok(Json(MovieDetailsResponse {
        poster_url: state.images.poster(movie.poster_path.as_deref(), ImageSize::Large),
        backdrop_url: state.images.backdrop(movie.backdrop_path.as_deref(), ImageSize::Large),
        year: movie.year(),
        rating: movie.formatted_rating(),
        runtime_text: details.formatted_runtime(),
        trailer_url: details.trailer_url(),
        cast: state.cast_cards(&details),
        is_favorite,
        details,
    }))
}

pub async fn movie_credits(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<Credits>> {
    Ok(Json(state.provider.movie_credits(movie_id).await?))
}

pub async fn movie_videos(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<VideoList>> {
    Ok(Json(state.provider.movie_videos(movie_id).await?))
}

pub async fn similar_movies(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<MoviePage>> {
    Ok(Json(state.provider.similar_movies(movie_id, params.page).await?))
}

pub async fn recommendations(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<MoviePage>> {
    Ok(Json(state.provider.recommendations(movie_id, params.page).await?))
}

pub async fn genres(State(state): State<AppState>) -> AppResult<Json<GenreList>> {
    Ok(Json(state.provider.genres().await?))
}

/// Get all favorites, newest first
pub async fn list_favorites(State(state): State<AppState>) -> AppResult<Json<Vec<FavoriteCard>>> {
    let favorites = state.store.blocking(|store| store.get_favorites()).await?;

    Ok(Json(
        favorites
            .into_iter()
            .map(|entry| FavoriteCard {
                card: state.movie_card(entry.movie, true),
                added_at: entry.added_at,
            })
            .collect(),
    ))
}

/// Add a favorite
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> AppResult<(StatusCode, Json<FavoriteStatus>)> {
    let id = movie.id;
    if !state.store.blocking(move |store| store.add_favorite(movie)).await? {
        return Err(AppError::Conflict("Could not add to favorites".to_string()));
    }

    Ok((StatusCode::CREATED, Json(FavoriteStatus { id, favorite: true })))
}

/// Add or remove a favorite depending on its current state
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> AppResult<Json<ToggleResponse>> {
    let id = movie.id;
    match state.discovery.toggle_favorite(movie).await? {
        FavoriteToggle::Rejected => {
            Err(AppError::Conflict("Could not add to favorites".to_string()))
        }
        result => Ok(Json(ToggleResponse {
            id,
            result,
            favorite: result == FavoriteToggle::Added,
        })),
    }
}

pub async fn favorite_status(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<Json<FavoriteStatus>> {
    let favorite = state
        .store
        .blocking(move |store| store.is_favorite(movie_id))
        .await?;

    Ok(Json(FavoriteStatus {
        id: movie_id,
        favorite,
    }))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<StatusCode> {
    if state
        .store
        .blocking(move |store| store.remove_favorite(movie_id))
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Movie {} is not a favorite", movie_id)))
    }
}

pub async fn clear_favorites(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.store.blocking(|store| store.clear_favorites()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get search history, newest first
pub async fn list_history(State(state): State<AppState>) -> AppResult<Json<Vec<HistoryEntry>>> {
    Ok(Json(state.store.blocking(|store| store.get_history()).await?))
}

pub async fn remove_history_entry(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<StatusCode> {
    if state
        .store
        .blocking(move |store| store.remove_history_entry(index))
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("No history entry at index {}", index)))
    }
}

pub async fn clear_history(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.store.blocking(|store| store.clear_history()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<Settings>> {
    Ok(Json(state.store.blocking(|store| store.get_settings()).await?))
}

/// Merge the given keys into the stored settings
pub async fn update_settings(
    State(state): State<AppState>,
    Json(partial): Json<Settings>,
) -> AppResult<Json<Settings>> {
    let merged = state
        .store
        .blocking(move |store| store.save_settings(partial))
        .await?;
    Ok(Json(merged))
}
