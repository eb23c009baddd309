//! In-memory store fake.
//!
//! Implements both store traits over plain maps so the cart and checkout
//! paths can be exercised with no data directory. Save failures can be
//! injected to test how callers surface persistence errors.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use sandbar_core::{Catalog, Product, ProductId, StoreError, User, UserId, UserStore};

/// In-memory catalog and user store.
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    users: RwLock<HashMap<UserId, User>>,
    fail_saves: AtomicBool,
    /// Remaining saves before injected failures kick in; negative means
    /// saves always succeed.
    save_budget: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::default(),
            users: RwLock::default(),
            fail_saves: AtomicBool::new(false),
            save_budget: AtomicI64::new(-1),
        }
    }

    /// Insert or replace a catalog product.
    pub async fn put_product(&self, product: Product) {
        let mut products = self.products.write().await;
        products.retain(|p| p.id != product.id);
        products.push(product);
    }

    /// Insert or replace a user record.
    pub async fn put_user(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    /// When set, every subsequent `save` fails with a persistence error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Let the next `n` saves succeed, then fail every save after them.
    pub fn fail_saves_after(&self, n: u32) {
        self.save_budget.store(i64::from(n), Ordering::SeqCst);
    }
}

#[async_trait]
impl Catalog for MemoryStore {
    async fn product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == *id)
            .cloned())
    }

    async fn products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.clone())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
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
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::persistence("injected save failure"));
        }
        let budget = self.save_budget.load(Ordering::SeqCst);
        if budget >= 0 {
            if budget == 0 {
                return Err(StoreError::persistence("injected save failure"));
            }
            self.save_budget.store(budget - 1, Ordering::SeqCst);
        }
        self.users.write().await.insert(user.id.clone(), user.clone());
        Ok(())
    }
}
