pub mod local_store;
pub mod redis_storage;
pub mod storage;

use std::sync::Arc;

pub use local_store::{LocalStore, StoreLimits};
pub use redis_storage::RedisStorage;
pub use storage::{FileStorage, MemoryStorage, Storage};

use crate::config::{Config, StorageBackend};

/// Creates the storage backend selected by the configuration
pub fn create_storage(config: &Config) -> anyhow::Result<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match config.storage_backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File => Arc::new(FileStorage::new(&config.storage_path)),
        StorageBackend::Redis => Arc::new(RedisStorage::open(
            &config.redis_url,
            config.redis_timeout(),
        )?),
    };

    tracing::info!(backend = storage.name(), "Storage backend ready");
    Ok(storage)
}
