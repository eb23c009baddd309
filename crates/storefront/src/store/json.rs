//! JSON-file-backed store.
//!
//! The data directory holds one document file per collection:
//! `products.json` (read-only catalog) and `users.json` (read/write).
//! Records are loaded into memory at startup; every user save rewrites
//! `users.json` through a temp-file-and-rename so a crash mid-write
//! never truncates the store. A `tokio::sync::RwLock` serializes writes,
//! which makes each save atomic at the granularity of one user record -
//! concurrent saves for the same user are last-writer-wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use sandbar_core::{Catalog, Product, ProductId, StoreError, User, UserId, UserStore};

/// File name of the catalog collection.
const PRODUCTS_FILE: &str = "products.json";
/// File name of the users collection.
const USERS_FILE: &str = "users.json";

/// JSON document store over a data directory.
#[derive(Debug)]
pub struct JsonStore {
    users_path: PathBuf,
    /// Catalog in file order; read-only after open, scanned linearly
    /// (the catalog is small).
    products: Vec<Product>,
    users: RwLock<HashMap<UserId, User>>,
}

impl JsonStore {
    /// Open a store rooted at `data_dir`.
    ///
    /// `products.json` must exist; a missing `users.json` starts the user
    /// collection empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Persistence` if either file cannot be read or
    /// parsed.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let products_path = data_dir.join(PRODUCTS_FILE);
        let users_path = data_dir.join(USERS_FILE);

        let raw = tokio::fs::read(&products_path)
            .await
            .map_err(StoreError::persistence)?;
        let products: Vec<Product> =
            serde_json::from_slice(&raw).map_err(StoreError::persistence)?;

        let users = match tokio::fs::read(&users_path).await {
            Ok(raw) => {
                let records: Vec<User> =
                    serde_json::from_slice(&raw).map_err(StoreError::persistence)?;
                records.into_iter().map(|u| (u.id.clone(), u)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::persistence(e)),
        };

        tracing::info!(
            products = products.len(),
            users = users.len(),
            dir = %data_dir.display(),
            "JSON store opened"
        );

        Ok(Self {
            users_path,
            products,
            users: RwLock::new(users),
        })
    }

    /// Rewrite `users.json` from the in-memory collection.
    ///
    /// Called with the write lock held so file writes never interleave.
    async fn flush_users(&self, users: &HashMap<UserId, User>) -> Result<(), StoreError> {
        let mut records: Vec<&User> = users.values().collect();
        // Deterministic file layout regardless of map iteration order.
        records.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        let raw = serde_json::to_vec_pretty(&records).map_err(StoreError::persistence)?;

        let tmp_path = self.users_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &raw)
            .await
            .map_err(StoreError::persistence)?;
        tokio::fs::rename(&tmp_path, &self.users_path)
            .await
            .map_err(StoreError::persistence)?;
        Ok(())
    }
}

#[async_trait]
impl Catalog for JsonStore {
    async fn product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.iter().find(|p| p.id == *id).cloned())
    }

    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.clone())
    }
}

#[async_trait]
impl UserStore for JsonStore {
    async fn load(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.token.as_deref() == Some(token))
            .cloned())
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        self.flush_users(&users).await
    }
}
