// lib/src/storage_engine/record_storage.rs
use async_trait::async_trait;
use sled::{Db, Tree};

use models::HealthRecord;

use crate::errors::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthRecordStorage: Send + Sync + 'static {
    /// Stores one assessment record.
    async fn save(&self, record: &HealthRecord) -> Result<()>;
    /// All records of one user, newest first.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<HealthRecord>>;
}

/// Sled-backed record store.
///
/// Keys are `user_id \0 prediction_millis(be) record_id`, so a prefix scan
/// yields one user's records in chronological order and reversing it gives
/// newest first.
pub struct SledHealthRecordStorage {
    tree: Tree,
}

impl SledHealthRecordStorage {
    /// Opens the "health_records" tree.
    pub fn new(db: &Db) -> Result<Self> {
        let tree = db.open_tree("health_records")?;
        Ok(Self { tree })
    }
}

fn user_prefix(user_id: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(user_id.len() + 1);
    prefix.extend_from_slice(user_id.as_bytes());
    prefix.push(0);
    prefix
}

fn record_key(record: &HealthRecord) -> Vec<u8> {
    let mut key = user_prefix(&record.user_id);
    let millis = record.prediction_date.timestamp_millis().max(0) as u64;
    key.extend_from_slice(&millis.to_be_bytes());
    key.extend_from_slice(record.id.as_bytes());
    key
}

#[async_trait]
impl HealthRecordStorage for SledHealthRecordStorage {
    async fn save(&self, record: &HealthRecord) -> Result<()> {
        let bytes = serde_json::to_vec(record)?;
        self.tree.insert(record_key(record), bytes)?;
        self.tree.flush_async().await?;
        Ok(())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<HealthRecord>> {
        let mut records = Vec::new();
        for item in self.tree.scan_prefix(user_prefix(user_id)).rev() {
            let (_key, value) = item?;
            records.push(serde_json::from_slice(&value)?);
        }
        Ok(records)
    }
}
