//! Sandbar Storefront library.
//!
//! This crate provides the storefront service as a library, allowing the
//! router to be driven directly in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
