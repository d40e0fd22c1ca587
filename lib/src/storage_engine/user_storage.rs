// lib/src/storage_engine/user_storage.rs
use async_trait::async_trait;
use sled::{Db, Tree};

use models::user::normalize_email;
use models::User;

use crate::errors::{AssessmentError, Result};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStorageEngine: Send + Sync + 'static {
    /// Adds a new user; fails with `AlreadyExists` when the email is taken.
    async fn add_user(&self, user: &User) -> Result<()>;
    /// Retrieves a user by email, compared case-insensitively.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Retrieves a user by their unique ID.
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
}

/// Sled-backed implementation of the `UserStorageEngine` trait.
///
/// "users" maps normalized email to the JSON user; "user_ids" maps the id
/// back to the email so lookups by id avoid a full scan.
pub struct SledUserStorage {
    users: Tree,
    ids: Tree,
}

impl SledUserStorage {
    pub fn new(db: &Db) -> Result<Self> {
        Ok(Self {
            users: db.open_tree("users")?,
            ids: db.open_tree("user_ids")?,
        })
    }
}

#[async_trait]
impl UserStorageEngine for SledUserStorage {
    async fn add_user(&self, user: &User) -> Result<()> {
        let email = normalize_email(&user.email);
        let user_bytes = serde_json::to_vec(user)?;

        // Insert only if absent, so two concurrent registrations cannot both win.
        let swapped = self.users.compare_and_swap(
            email.as_bytes(),
            None as Option<&[u8]>,
            Some(user_bytes),
        )?;
        if swapped.is_err() {
            return Err(AssessmentError::AlreadyExists(format!("User {}", email)));
        }

        self.ids.insert(user.id.as_bytes(), email.as_bytes())?;
        self.users.flush_async().await?;
        self.ids.flush_async().await?;
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        match self.users.get(normalize_email(email).as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let Some(email) = self.ids.get(id.as_bytes())? else {
            return Ok(None);
        };
        let email = String::from_utf8(email.to_vec())
            .map_err(|e| AssessmentError::StorageError(format!("Corrupt user index: {}", e)))?;
        self.get_user_by_email(&email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::NewUser;

    fn user(email: &str) -> User {
        User::from_new_user(
            NewUser {
                name: "Dana".to_string(),
                email: email.to_string(),
                password: "secret123".to_string(),
            },
            "$argon2id$stub".to_string(),
        )
    }

    fn storage() -> (tempfile::TempDir, SledUserStorage) {
        let dir = tempfile::tempdir().unwrap();
        let db = sled::open(dir.path()).unwrap();
        let storage = SledUserStorage::new(&db).unwrap();
        (dir, storage)
    }

    #[tokio::test]
    async fn add_then_lookup_by_email_and_id() {
        let (_dir, storage) = storage();
        let dana = user("dana@example.com");
        storage.add_user(&dana).await.unwrap();

        let by_email = storage.get_user_by_email("DANA@example.com").await.unwrap();
        assert_eq!(by_email.as_ref(), Some(&dana));
        let by_id = storage.get_user_by_id(&dana.id).await.unwrap();
        assert_eq!(by_id, Some(dana));
        assert!(storage.get_user_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (_dir, storage) = storage();
        storage.add_user(&user("dana@example.com")).await.unwrap();
        let err = storage.add_user(&user("Dana@Example.com")).await.unwrap_err();
        assert!(matches!(err, AssessmentError::AlreadyExists(_)));
    }
}
