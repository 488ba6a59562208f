//! # Catalog Config
//!
//! Configuration management for the catalog.
//! Supports layered configuration from files and environment variables,
//! per-namespace cache TTLs and mutation policies, and runtime refresh.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
