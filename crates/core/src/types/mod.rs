//! Shared newtype wrappers.

pub mod id;
pub mod money;

pub use id::{AddressId, ProductId, UserId};
pub use money::Money;
