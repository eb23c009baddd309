//! External service clients.

pub mod payments;

pub use payments::{PaymentClient, PaymentError};
