use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, UuidRequestId};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Mood
        .route("/classify", post(handlers::classify))
        .route("/search", post(handlers::search_by_mood))
        // Movie metadata
        .route("/movies/search", get(handlers::search_titles))
        .route("/movies/popular", get(handlers::popular_movies))
        .route("/movies/top_rated", get(handlers::top_rated_movies))
        .route("/movies/:id", get(handlers::movie_details))
        .route("/movies/:id/credits", get(handlers::movie_credits))
        .route("/movies/:id/videos", get(handlers::movie_videos))
        .route("/movies/:id/similar", get(handlers::similar_movies))
        .route("/movies/:id/recommendations", get(handlers::recommendations))
        .route("/genres", get(handlers::genres))
        // Favorites
        .route(
            "/favorites",
            get(handlers::list_favorites)
                .post(handlers::add_favorite)
                .delete(handlers::clear_favorites),
        )
        .route("/favorites/toggle", post(handlers::toggle_favorite))
        .route(
            "/favorites/:id",
            get(handlers::favorite_status).delete(handlers::remove_favorite),
        )
        // History
        .route(
            "/history",
            get(handlers::list_history).delete(handlers::clear_history),
        )
        .route("/history/:index", delete(handlers::remove_history_entry))
        // Settings
        .route(
            "/settings",
            get(handlers::get_settings).patch(handlers::update_settings),
        )
}
