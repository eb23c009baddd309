//! Application state shared across handlers.

use std::sync::Arc;

use sandbar_core::{Catalog, UserStore};

use crate::config::PaymentConfig;
use crate::services::{PaymentClient, PaymentError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the store handles and the payment client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Arc<dyn Catalog>,
    users: Arc<dyn UserStore>,
    payments: PaymentClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment client cannot be constructed from
    /// the configuration.
    pub fn new(
        payment: &PaymentConfig,
        catalog: Arc<dyn Catalog>,
        users: Arc<dyn UserStore>,
    ) -> Result<Self, PaymentError> {
        let payments = PaymentClient::new(payment)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                catalog,
                users,
                payments,
            }),
        })
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn Catalog {
        self.inner.catalog.as_ref()
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get a reference to the payment provider client.
    #[must_use]
    pub fn payments(&self) -> &PaymentClient {
        &self.inner.payments
    }
}
