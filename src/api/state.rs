use std::sync::Arc;

use crate::{
    catalog::Catalog,
    config::Config,
    db::{create_storage, LocalStore, Storage, StoreLimits},
    services::{
        DemoProvider, DiscoveryService, ImageUrls, MoodClassifier, MovieProvider, TmdbProvider,
    },
};

/// Shared application state
///
/// Every service is built from injected parts, so tests can assemble one around a
/// `MemoryStorage` and the demo provider.
#[derive(Clone)]
pub struct AppState {
    pub classifier: MoodClassifier,
    pub discovery: DiscoveryService,
    pub provider: Arc<dyn MovieProvider>,
    pub store: Arc<LocalStore>,
    pub images: ImageUrls,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        storage: Arc<dyn Storage>,
        provider: Arc<dyn MovieProvider>,
        limits: StoreLimits,
        image_base_url: &str,
    ) -> Self {
        let classifier = MoodClassifier::new(catalog.clone());
        let store = Arc::new(LocalStore::new(storage, limits));
        let discovery = DiscoveryService::new(classifier.clone(), provider.clone(), store.clone());

        Self {
            classifier,
            discovery,
            provider,
            store,
            images: ImageUrls::new(image_base_url, catalog),
        }
    }

    /// Builds the state described by `config`
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = Arc::new(match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::default(),
        });

        let provider: Arc<dyn MovieProvider> = match config.api_key() {
            Some(key) => Arc::new(TmdbProvider::new(
                key.to_string(),
                config.tmdb_api_url.clone(),
            )),
            None => {
                tracing::warn!("TMDB API key not configured, serving demo data");
                Arc::new(DemoProvider::new(catalog.clone()))
            }
        };

        let storage = create_storage(config)?;
        let limits = StoreLimits {
            max_favorites: config.max_favorites,
            max_history: config.max_history,
        };

        Ok(Self::new(
            catalog,
            storage,
            provider,
            limits,
            &config.tmdb_image_url,
        ))
    }

    /// The catalog the classifier was built with
    pub fn catalog(&self) -> &Catalog {
        self.classifier.catalog()
    }
}
