use std::sync::Arc;

use crate::catalog::{Catalog, ImageSize, SizeTiers};

const NO_POSTER: &str = "https://via.placeholder.com/342x513/1e182a/ffffff?text=No+Poster";
const NO_BACKDROP: &str = "https://via.placeholder.com/1280x720/1e182a/ffffff?text=No+Backdrop";
const NO_PROFILE: &str = "https://via.placeholder.com/185x278/1e182a/ffffff?text=No+Photo";

/// Builds TMDB image CDN URLs from image paths
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
    catalog: Arc<Catalog>,
}

impl ImageUrls {
    pub fn new(base_url: &str, catalog: Arc<Catalog>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            catalog,
        }
    }

    pub fn poster(&self, path: Option<&str>, size: ImageSize) -> String {
        self.build(path, &self.catalog.image_sizes.poster, size, NO_POSTER)
    }

    pub fn backdrop(&self, path: Option<&str>, size: ImageSize) -> String {
        self.build(path, &self.catalog.image_sizes.backdrop, size, NO_BACKDROP)
    }

    pub fn profile(&self, path: Option<&str>, size: ImageSize) -> String {
        self.build(path, &self.catalog.image_sizes.profile, size, NO_PROFILE)
    }

    fn build(
        &self,
        path: Option<&str>,
        tiers: &SizeTiers,
        size: ImageSize,
        placeholder: &str,
    ) -> String {
        match path.filter(|p| !p.is_empty()) {
            Some(path) => format!("{}/{}{}", self.base_url, tiers.get(size), path),
            None => placeholder.to_string(),
        }
    }
}
