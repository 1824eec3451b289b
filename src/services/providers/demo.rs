//! Embedded demo dataset used when no TMDB key is configured
use std::sync::Arc;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{
        CastMember, Credits, Genre, GenreId, GenreList, Movie, MovieDetails, MovieId, MoviePage,
        Video, VideoList,
    },
    services::providers::MovieProvider,
};

const DEMO_RUNTIME: u32 = 148;
const DEMO_CAST: [&str; 6] = [
    "Leonardo DiCaprio",
    "Joseph Gordon-Levitt",
    "Elliot Page",
    "Tom Hardy",
    "Ken Watanabe",
    "Cillian Murphy",
];
const DEMO_TRAILER_KEY: &str = "YoHD9XEInc0";

/// Serves a fixed set of well-known titles in TMDB's response shapes
#[derive(Clone)]
pub struct DemoProvider {
    catalog: Arc<Catalog>,
    movies: Vec<Movie>,
}

impl DemoProvider {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            movies: demo_movies(),
        }
    }

    fn find(&self, movie_id: MovieId) -> AppResult<&Movie> {
        self.movies
            .iter()
            .find(|m| m.id == movie_id)
            .ok_or_else(|| AppError::NotFound(format!("Movie {} is not in the demo set", movie_id)))
    }

    fn page_of(&self, movies: Vec<Movie>, page: u32) -> MoviePage {
        if page > 1 {
            MoviePage::empty(page)
        } else {
            MoviePage::single(movies)
        }
    }

    /// `movies` ordered best rated first
    fn best_rated(mut movies: Vec<Movie>) -> Vec<Movie> {
        movies.sort_by(|a, b| {
            b.vote_average
                .unwrap_or_default()
                .total_cmp(&a.vote_average.unwrap_or_default())
        });
        movies
    }

    /// Other demo titles sharing at least one genre with `movie_id`
    fn related(&self, movie_id: MovieId) -> AppResult<Vec<Movie>> {
        let source = self.find(movie_id)?;
        Ok(self
            .movies
            .iter()
            .filter(|m| m.id != movie_id)
            .filter(|m| m.genre_ids.iter().any(|g| source.genre_ids.contains(g)))
            .cloned()
            .collect())
    }

    fn credits_for(&self, movie_id: MovieId) -> Credits {
        Credits {
            id: Some(movie_id),
            cast: DEMO_CAST
                .iter()
                .map(|name| CastMember {
                    name: name.to_string(),
                    character: None,
                    profile_path: None,
                })
                .collect(),
            crew: Vec::new(),
        }
    }

    fn videos_for(&self, movie_id: MovieId) -> VideoList {
        VideoList {
            id: Some(movie_id),
            results: vec![Video {
                key: DEMO_TRAILER_KEY.to_string(),
                site: "YouTube".to_string(),
                video_type: "Trailer".to_string(),
                name: None,
            }],
        }
    }
}

#[async_trait::async_trait]
impl MovieProvider for DemoProvider {
    /// The demo set is small enough to return whole, whatever the genres
    async fn discover_by_genres(&self, genre_ids: &[GenreId], page: u32) -> AppResult<MoviePage> {
        tracing::info!(
            genres = ?genre_ids,
            results = self.movies.len(),
            provider = "demo",
            "Serving demo movies"
        );
        Ok(self.page_of(self.movies.clone(), page))
    }

    async fn search_movies(&self, query: &str, page: u32) -> AppResult<MoviePage> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let matches = self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&query))
            .cloned()
            .collect();
        Ok(self.page_of(matches, page))
    }

    async fn popular_movies(&self, page: u32) -> AppResult<MoviePage> {
        Ok(self.page_of(self.movies.clone(), page))
    }

    async fn top_rated_movies(&self, page: u32) -> AppResult<MoviePage> {
        Ok(self.page_of(Self::best_rated(self.movies.clone()), page))
    }

    async fn movie_details(&self, movie_id: MovieId) -> AppResult<MovieDetails> {
        let movie = self.find(movie_id)?.clone();
        let genres = movie
            .genre_ids
            .iter()
            .map(|id| Genre {
                id: *id,
                name: self.catalog.genre_name(*id).to_string(),
            })
            .collect();

        Ok(MovieDetails {
            genres,
            runtime: Some(DEMO_RUNTIME),
            original_language: Some("en".to_string()),
            credits: Some(self.credits_for(movie_id)),
            videos: Some(self.videos_for(movie_id)),
            similar: Some(MoviePage::single(self.related(movie_id)?)),
            movie,
        })
    }

    async fn movie_credits(&self, movie_id: MovieId) -> AppResult<Credits> {
        self.find(movie_id)?;
        Ok(self.credits_for(movie_id))
    }

    async fn movie_videos(&self, movie_id: MovieId) -> AppResult<VideoList> {
        self.find(movie_id)?;
        Ok(self.videos_for(movie_id))
    }

    async fn similar_movies(&self, movie_id: MovieId, page: u32) -> AppResult<MoviePage> {
        Ok(self.page_of(self.related(movie_id)?, page))
    }

    /// Every other demo title, best rated first
    async fn recommendations(&self, movie_id: MovieId, page: u32) -> AppResult<MoviePage> {
        self.find(movie_id)?;
        let others = self
            .movies
            .iter()
            .filter(|m| m.id != movie_id)
            .cloned()
            .collect();
        Ok(self.page_of(Self::best_rated(others), page))
    }

    async fn genres(&self) -> AppResult<GenreList> {
        Ok(GenreList {
            genres: self.catalog.genre_list(),
        })
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_movie(
    id: MovieId,
    title: &str,
    overview: &str,
    poster_path: &str,
    backdrop_path: &str,
    release_date: &str,
    vote_average: f64,
    genre_ids: &[GenreId],
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: Some(overview.to_string()),
        poster_path: Some(poster_path.to_string()),
        backdrop_path: Some(backdrop_path.to_string()),
        release_date: Some(release_date.to_string()),
        vote_average: Some(vote_average),
        genre_ids: genre_ids.to_vec(),
    }
}

fn demo_movies() -> Vec<Movie> {
    vec![
        demo_movie(
            27205,
            "Inception",
            "Cobb, a skilled thief who commits corporate espionage by infiltrating the subconscious of his targets is offered a chance to regain his old life as payment for a task considered to be impossible: \"inception\".",
            "/8IB2e4r4oVhHnANbnm7O3Tj6tF8.jpg",
            "/s3TBrRGB1iav7gFOCNx3H31MoES.jpg",
            "2010-07-16",
            8.4,
            &[28, 878, 12],
        ),
        demo_movie(
            157336,
            "Interstellar",
            "The adventures of a group of explorers who make use of a newly discovered wormhole to surpass the limitations on human space travel and conquer the vast distances involved in an interstellar voyage.",
            "/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
            "/xJHokMbljvjADYdit5fK5VQsXEG.jpg",
            "2014-11-05",
            8.4,
            &[12, 18, 878],
        ),
        demo_movie(
            155,
            "The Dark Knight",
            "Batman raises the stakes in his war on crime. With the help of Lt. Jim Gordon and District Attorney Harvey Dent, Batman sets out to dismantle the remaining criminal organizations.",
            "/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
            "/nMKdUUepR0i5zn0y1T4CsSB5chy.jpg",
            "2008-07-16",
            8.5,
            &[18, 28, 80, 53],
        ),
        demo_movie(
            550,
            "Fight Club",
            "A ticking-time-bomb insomniac and a slippery soap salesman channel primal male aggression into a shocking new form of therapy.",
            "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg",
            "1999-10-15",
            8.4,
            &[18],
        ),
        demo_movie(
            680,
            "Pulp Fiction",
            "A burger-loving hit man, his philosophical partner, a drug-addled gangster's moll and a washed-up boxer converge in this sprawling, comedic crime caper.",
            "/d5iIlFn5s0ImszYzBPb8JPIfbXD.jpg",
            "/suaEOtk1N1sgg2MTM7oZd2cfVp3.jpg",
            "1994-09-10",
            8.5,
            &[53, 80],
        ),
        demo_movie(
            238,
            "The Godfather",
            "Spanning the years 1945 to 1955, a chronicle of the fictional Italian-American Corleone crime family.",
            "/3bhkrj58Vtu7enYsRolD1fZdja1.jpg",
            "/tmU7GeKVybMWFButWEGl2M4GeiP.jpg",
            "1972-03-14",
            8.7,
            &[18, 80],
        ),
        demo_movie(
            278,
            "The Shawshank Redemption",
            "Framed in the 1940s for the double murder of his wife and her lover, upstanding banker Andy Dufresne begins a new life at the Shawshank prison.",
            "/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg",
            "/kXfqcdQKsToO0OUXHcrrNCHDBzO.jpg",
            "1994-09-23",
            8.7,
            &[18, 80],
        ),
        demo_movie(
            13,
            "Forrest Gump",
            "A man with a low IQ has accomplished great things in his life and been present during significant historic events, in each case far exceeding what anyone imagined he could do.",
            "/arw2vcBveWOVZr6pxd9XTd1TdQa.jpg",
            "/3h1JZGDhZ8nzxdgvkxha0qBqi05.jpg",
            "1994-06-23",
            8.5,
            &[35, 18, 10749],
        ),
    ]
}
