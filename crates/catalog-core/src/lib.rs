//! # Catalog Core
//!
//! Core types, traits, and error definitions shared by every catalog crate.
//! Holds the domain entities (categories, products, persons) that the cache
//! layer snapshots and the repositories persist.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
