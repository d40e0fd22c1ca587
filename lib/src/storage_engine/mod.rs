// lib/src/storage_engine/mod.rs
// Persistence for users and assessment records.

pub mod inmemory_storage;
pub mod record_storage;
pub mod user_storage;

pub use inmemory_storage::InMemoryStorage;
pub use record_storage::{HealthRecordStorage, SledHealthRecordStorage};
pub use user_storage::{SledUserStorage, UserStorageEngine};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::config::{StorageConfig, StorageEngineType};
use crate::errors::Result;

/// Both stores, backed by the same engine.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn HealthRecordStorage>,
    pub users: Arc<dyn UserStorageEngine>,
}

/// Opens (creating if needed) the sled database under `path`.
pub fn open_sled_db(path: &Path) -> Result<sled::Db> {
    if !path.exists() {
        info!("Creating database directory at {:?}", path);
        fs::create_dir_all(path)?;
    }
    let db = sled::open(path)?;
    info!("Opened sled database at {:?}", path);
    Ok(db)
}

/// Creates the stores for the configured engine.
pub fn open_storage(config: &StorageConfig) -> Result<Storage> {
    match config.engine {
        StorageEngineType::Sled => {
            let db = open_sled_db(&config.data_directory)?;
            Ok(Storage {
                records: Arc::new(SledHealthRecordStorage::new(&db)?),
                users: Arc::new(SledUserStorage::new(&db)?),
            })
        }
        StorageEngineType::InMemory => {
            info!("Using in-memory storage; nothing survives a restart");
            let storage = Arc::new(InMemoryStorage::new());
            Ok(Storage {
                records: storage.clone(),
                users: storage,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sled_engine_creates_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            engine: StorageEngineType::Sled,
            data_directory: dir.path().join("nested").join("db"),
        };
        let storage = open_storage(&config).unwrap();
        assert!(config.data_directory.exists());
        assert!(storage.users.get_user_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn in_memory_engine_shares_one_store() {
        let config = StorageConfig {
            engine: StorageEngineType::InMemory,
            data_directory: "/unused".into(),
        };
        let storage = open_storage(&config).unwrap();
        assert!(storage.records.find_by_user("u").await.unwrap().is_empty());
    }
}
