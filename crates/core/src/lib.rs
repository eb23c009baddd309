//! Sandbar Core - Shared domain library.
//!
//! This crate provides the types and logic shared across all Sandbar
//! components:
//! - `storefront` - Public JSON API for catalog, cart, and checkout
//! - `cli` - Command-line tools for seeding store data
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions, and the store
//! traits - no I/O, no HTTP clients. The cart reconciler and checkout
//! totalizer live here so they can be tested without a running service
//! or a data directory.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and minor-unit prices
//! - [`models`] - Catalog and user domain types
//! - [`cart`] - Cart reconciliation (upsert/overwrite/delete of cart lines)
//! - [`checkout`] - Order totalization and checkout precondition checks
//! - [`store`] - Async catalog and user-store traits

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod error;
pub mod models;
pub mod store;
pub mod types;

pub use cart::reconcile;
pub use checkout::{CheckoutResult, LineItem, totalize};
pub use error::{CartError, CheckoutError};
pub use models::{Address, CartLine, Product, User};
pub use store::{Catalog, StoreError, UserStore};
pub use types::{AddressId, Money, ProductId, UserId};
