// lib/src/storage_engine/inmemory_storage.rs
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use models::user::normalize_email;
use models::{HealthRecord, User};

use super::record_storage::HealthRecordStorage;
use super::user_storage::UserStorageEngine;
use crate::errors::{AssessmentError, Result};

/// Process-local storage for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    users: RwLock<HashMap<String, User>>,
    records: RwLock<Vec<HealthRecord>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HealthRecordStorage for InMemoryStorage {
    async fn save(&self, record: &HealthRecord) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<HealthRecord>> {
        let records = self.records.read().await;
        // Reverse insertion order first so equal timestamps also list newest first.
        let mut found: Vec<HealthRecord> = records
            .iter()
            .rev()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.prediction_date.cmp(&a.prediction_date));
        Ok(found)
    }
}

#[async_trait]
impl UserStorageEngine for InMemoryStorage {
    async fn add_user(&self, user: &User) -> Result<()> {
        let email = normalize_email(&user.email);
        let mut users = self.users.write().await;
        if users.contains_key(&email) {
            return Err(AssessmentError::AlreadyExists(format!("User {}", email)));
        }
        users.insert(email, user.clone());
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&normalize_email(email)).cloned())
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == id)
            .cloned())
    }
}
