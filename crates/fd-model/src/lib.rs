//! fd-model: composition model for flowdiag.
//!
//! Provides:
//! - Core composition data structures (Component, Adapter, input/output slots)
//! - Incremental composition builder with validation
//!
//! A composition owns processing components with ordered, named input and
//! output slots, plus single-input/single-output adapters wired between
//! them. Adapters may chain to arbitrary depth.
//!
//! # Example
//!
//! ```
//! use fd_model::CompositionBuilder;
//!
//! let mut builder = CompositionBuilder::new();
//! let src = builder.add_component("Source", &[], &["Out"]);
//! let dst = builder.add_component("Sink", &["In"], &[]);
//! builder.connect((src, "Out"), (dst, "In")).unwrap();
//! let comp = builder.build().unwrap();
//!
//! assert_eq!(comp.components().len(), 2);
//! assert_eq!(comp.adapters().len(), 0);
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::CompositionBuilder;
pub use error::ModelError;
pub use model::{Adapter, Component, Composition, InputSlot, OutputSlot, SlotSource, SlotTarget};
