//! # Catalog Repository
//!
//! The authoritative store behind the cache. Services read through
//! [`CrudRepository`] on a cache miss and persist every mutation through it
//! before touching the cache.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn CrudRepository<E>>
//! InMemoryRepository<E>
//! ```

pub mod memory;
pub mod traits;

pub use memory::InMemoryRepository;
pub use traits::CrudRepository;
