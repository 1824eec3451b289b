//! TMDB v3 API provider
//!
//! Every request is a GET with the API key passed as the `api_key` query parameter.
//! Non-success statuses are surfaced as `AppError::ExternalApi` with the response body.
use crate::{
    error::{AppError, AppResult},
    models::{Credits, GenreId, GenreList, MovieDetails, MovieId, MoviePage, VideoList},
    services::providers::MovieProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

/// Titles with fewer votes are left out of mood discovery
const MIN_VOTE_COUNT: &str = "100";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// GETs `endpoint` with the API key and `params`, decoding the JSON body as `T`
    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                endpoint = %endpoint,
                status = %status,
                provider = "tmdb",
                "TMDB request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                endpoint = %endpoint,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn discover_by_genres(&self, genre_ids: &[GenreId], page: u32) -> AppResult<MoviePage> {
        let with_genres = genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let movies: MoviePage = self
            .request(
                "/discover/movie",
                &[
                    ("with_genres", with_genres.clone()),
                    ("sort_by", "popularity.desc".to_string()),
                    ("include_adult", "false".to_string()),
                    ("include_video", "false".to_string()),
                    ("page", page.max(1).to_string()),
                    ("vote_count.gte", MIN_VOTE_COUNT.to_string()),
                ],
            )
            .await?;

        tracing::info!(
            genres = %with_genres,
            page = movies.page,
            results = movies.results.len(),
            provider = "tmdb",
            "Discover completed"
        );

        Ok(movies)
    }

    async fn search_movies(&self, query: &str, page: u32) -> AppResult<MoviePage> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let movies: MoviePage = self
            .request(
                "/search/movie",
                &[
                    ("query", query.to_string()),
                    ("include_adult", "false".to_string()),
                    ("page", page.max(1).to_string()),
                ],
            )
            .await?;

        tracing::info!(
            query = %query,
            results = movies.results.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(movies)
    }

    async fn popular_movies(&self, page: u32) -> AppResult<MoviePage> {
        self.request("/movie/popular", &[("page", page.max(1).to_string())]).await
    }

    async fn top_rated_movies(&self, page: u32) -> AppResult<MoviePage> {
        self.request("/movie/top_rated", &[("page", page.max(1).to_string())]).await
    }

    async fn movie_details(&self, movie_id: MovieId) -> AppResult<MovieDetails> {
        let details: MovieDetails = self
            .request(
                &format!("/movie/{}", movie_id),
                &[("append_to_response", "credits,videos,similar".to_string())],
            )
            .await?;

        tracing::info!(movie_id, provider = "tmdb", "Movie details fetched");
        Ok(details)
    }

    async fn movie_credits(&self, movie_id: MovieId) -> AppResult<Credits> {
        self.request(&format!("/movie/{}/credits", movie_id), &[]).await
    }

    async fn movie_videos(&self, movie_id: MovieId) -> AppResult<VideoList> {
        self.request(&format!("/movie/{}/videos", movie_id), &[]).await
    }

    async fn similar_movies(&self, movie_id: MovieId, page: u32) -> AppResult<MoviePage> {
        self.request(
            &format!("/movie/{}/similar", movie_id),
            &[("page", page.max(1).to_string())],
        )
        .await
    }

    async fn recommendations(&self, movie_id: MovieId, page: u32) -> AppResult<MoviePage> {
        self.request(
            &format!("/movie/{}/recommendations", movie_id),
            &[("page", page.max(1).to_string())],
        )
        .await
    }

    async fn genres(&self) -> AppResult<GenreList> {
        self.request("/genre/movie/list", &[]).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
