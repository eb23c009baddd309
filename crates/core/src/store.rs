//! Store traits for the catalog and user records.
//!
//! The service accesses all persistent state through these traits so the
//! cart/checkout logic can be exercised against an in-memory fake with no
//! data directory. Stores are atomic at the granularity of one user
//! record: a `save` replaces the whole record, last writer wins.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Product, User};
use crate::types::{ProductId, UserId};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by a store backend.
///
/// Distinct from validation failures: after a persistence error the
/// client must treat the operation's effect as unknown.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be read or written.
    #[error("persistence failure: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap any error as a persistence failure.
    pub fn persistence(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Persistence(err.into())
    }
}

/// Read-only product catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Resolve a product by id. `None` means the product does not exist
    /// (or no longer exists).
    async fn product(&self, id: &ProductId) -> Result<Option<Product>>;

    /// List the full catalog.
    async fn products(&self) -> Result<Vec<Product>>;
}

/// User record store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Load a user by id.
    async fn load(&self, id: &UserId) -> Result<Option<User>>;

    /// Resolve a user by their API bearer token.
    async fn find_by_token(&self, token: &str) -> Result<Option<User>>;

    /// Persist a user record, replacing the stored one.
    async fn save(&self, user: &User) -> Result<()>;
}
