use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::models::user::{User, UserRecord};

pub type StoreResult<T> = Result<T, StoreError>;

/// JSON-file-backed user persistence.
///
/// The file (an array of user records) is loaded once at startup and kept
/// in memory; mutations write the file back through the write guard.
/// Usernames starting with `_` are reserved records: hidden from listings
/// and never persisted.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    users: RwLock<HashMap<String, UserRecord>>,
}

impl UserStore {
    pub async fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let raw = tokio::fs::read(&path).await?;
        let records: Vec<UserRecord> = serde_json::from_slice(&raw)?;
        let users = records
            .into_iter()
            .map(|record| (record.username.clone(), record))
            .collect();

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users.read().await.get(username).cloned()
    }

    /// Public views of all non-reserved users, sorted by username.
    pub async fn list(&self) -> Vec<User> {
        let users = self.users.read().await;
        let mut names: Vec<&String> = users
            .keys()
            .filter(|name| !name.starts_with('_'))
            .collect();
        names.sort();

        names
            .into_iter()
            .filter_map(|name| users.get(name))
            .map(UserRecord::public)
            .collect()
    }

    /// Inserts a new record and persists the store.
    pub async fn add(&self, record: UserRecord) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&record.username) {
            return Err(StoreError::DuplicateUser(record.username));
        }

        let public = record.public();
        users.insert(record.username.clone(), record);
        Self::persist(&self.path, &users).await?;

        Ok(public)
    }

    async fn persist(path: &Path, users: &HashMap<String, UserRecord>) -> StoreResult<()> {
        let mut records: Vec<&UserRecord> = users
            .values()
            .filter(|record| !record.username.starts_with('_'))
            .collect();
        records.sort_by(|a, b| a.username.cmp(&b.username));

        let body = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(path, body).await?;

        Ok(())
    }
}
