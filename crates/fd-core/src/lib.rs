//! fd-core: stable foundation for flowdiag.
//!
//! Contains:
//! - ids (stable compact IDs for composition/graph objects)
//! - error (shared error types)

pub mod error;
pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FdError, FdResult};
pub use ids::*;
