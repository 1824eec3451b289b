use serde::{Deserialize, Serialize};

pub mod library;
pub mod mood;

pub use library::{FavoriteEntry, HistoryEntry, NewHistoryEntry, Settings};
pub use mood::{ClassificationResult, MatchedCategory, MoodCategory};

/// TMDB movie identifier
pub type MovieId = u64;

/// TMDB genre identifier (e.g. 35 = Comedy)
pub type GenreId = u32;

/// A movie as returned by TMDB list endpoints and as stored in favorites
///
/// Only `id` and `title` are required; everything else TMDB may omit or send as null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
}

impl Movie {
    /// Release year, or "N/A" when TMDB has no date
    pub fn year(&self) -> String {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .unwrap_or("N/A")
            .to_string()
    }

    /// Vote average with one decimal; TMDB uses 0 for "no votes"
    pub fn formatted_rating(&self) -> String {
        match self.vote_average {
            Some(rating) if rating > 0.0 => format!("{:.1}", rating),
            _ => "N/A".to_string(),
        }
    }
}

/// One page of a TMDB list endpoint (discover, search, similar, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

impl MoviePage {
    /// A page holding every given movie
    pub fn single(results: Vec<Movie>) -> Self {
        let total_results = results.len() as u32;
        Self {
            page: 1,
            results,
            total_pages: 1,
            total_results,
        }
    }

    pub fn empty(page: u32) -> Self {
        Self {
            page,
            results: Vec::new(),
            total_pages: 1,
            total_results: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Response of `/genre/movie/list`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Response of `/movie/{id}/credits`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response of `/movie/{id}/videos`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MovieId>,
    #[serde(default)]
    pub results: Vec<Video>,
}

impl VideoList {
    /// YouTube link for the best trailer: an official "Trailer" first, any YouTube video otherwise
    pub fn trailer_url(&self) -> Option<String> {
        self.results
            .iter()
            .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
            .or_else(|| self.results.iter().find(|v| v.site == "YouTube"))
            .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
    }
}

/// Response of `/movie/{id}` with `append_to_response=credits,videos,similar`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<Credits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<VideoList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar: Option<MoviePage>,
}

impl MovieDetails {
    /// Runtime as "2h 28m" / "45m", or "N/A" when unknown
    pub fn formatted_runtime(&self) -> String {
        match self.runtime {
            Some(minutes) if minutes > 0 => {
                let (hours, mins) = (minutes / 60, minutes % 60);
                if hours > 0 {
                    format!("{}h {}m", hours, mins)
                } else {
                    format!("{}m", mins)
                }
            }
            _ => "N/A".to_string(),
        }
    }

    pub fn trailer_url(&self) -> Option<String> {
        self.videos.as_ref().and_then(VideoList::trailer_url)
    }
}
