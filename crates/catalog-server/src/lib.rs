//! # Catalog Server Library
//!
//! Wiring of the cache backend, repositories and services, plus the
//! walk-through the binary runs against them.

pub mod app;
pub mod startup;
pub mod walkthrough;
