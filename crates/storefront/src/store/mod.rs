//! Store backends for the catalog and user records.
//!
//! Two implementations of the core store traits:
//!
//! - [`json::JsonStore`] - the production backend, one JSON document file
//!   per collection in the data directory
//! - [`memory::MemoryStore`] - in-memory fake for tests

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;
