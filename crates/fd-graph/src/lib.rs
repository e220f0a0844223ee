//! fd-graph: graph extraction for flowdiag.
//!
//! Derives, from a composition's raw slot wiring, a clean diagram graph:
//! the set of components, the adapters discovered along every wire, and
//! three edge views at different levels of resolution:
//!
//! - `edges`: component/adapter boundary edges plus adapter-to-adapter
//!   interior edges, for rendering adapters individually
//! - `direct_edges`: adapter chains collapsed into one component-to-component
//!   edge carrying the chain length as a hop count
//! - `simple_edges`: deduplicated component-to-component pairs, for
//!   rendering without any slot or adapter detail
//!
//! # Example
//!
//! ```
//! use fd_model::CompositionBuilder;
//! use fd_graph::Graph;
//!
//! let mut builder = CompositionBuilder::new();
//! let src = builder.add_component("Source", &[], &["Out"]);
//! let dst = builder.add_component("Sink", &["In"], &[]);
//! let ad = builder.add_adapter("Scale");
//! builder.connect_via((src, "Out"), &[ad], (dst, "In")).unwrap();
//! let composition = builder.build().unwrap();
//!
//! let graph = Graph::build(&composition, &Default::default()).unwrap();
//! assert_eq!(graph.components().len(), 2);
//! assert_eq!(graph.adapters().len(), 1);
//! assert_eq!(graph.direct_edges()[0].hops, 1);
//! ```

pub(crate) mod build;
pub mod edge;
pub mod error;
pub mod graph;

// Re-exports for ergonomics
pub use edge::{Edge, EdgeKey, NodeRef};
pub use error::GraphError;
pub use graph::Graph;
