pub mod classifier;
pub mod discovery;
pub mod images;
pub mod providers;

pub use classifier::MoodClassifier;
pub use discovery::{DiscoveryService, FavoriteToggle, MoodSearch};
pub use images::ImageUrls;
pub use providers::{DemoProvider, MovieProvider, TmdbProvider};
