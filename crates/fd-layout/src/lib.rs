//! fd-layout: grid layout optimization for flowdiag.
//!
//! Assigns every diagram node an integer grid cell so that edges read
//! left-to-right with few reversals, using randomized local search
//! (greedy hill climbing with plateau moves) and a stagnation-based
//! early stop.
//!
//! # Example
//!
//! ```
//! use fd_model::CompositionBuilder;
//! use fd_graph::Graph;
//! use fd_layout::{LayoutConfig, optimize};
//!
//! let mut builder = CompositionBuilder::new();
//! let a = builder.add_component("A", &[], &["Out"]);
//! let b = builder.add_component("B", &["In"], &[]);
//! builder.connect((a, "Out"), (b, "In")).unwrap();
//! let composition = builder.build().unwrap();
//! let graph = Graph::build(&composition, &Default::default()).unwrap();
//!
//! let config = LayoutConfig { seed: Some(42), ..Default::default() };
//! let positions = optimize(&graph, &config);
//! assert_eq!(positions.len(), 2);
//! ```

pub mod optimize;
pub mod position;
pub(crate) mod score;

// Re-exports for ergonomics
pub use optimize::{Detail, LayoutConfig, LayoutResult, optimize, optimize_with_stats};
pub use position::{GridPos, PositionMap};
