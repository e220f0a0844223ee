//! The extracted diagram graph.

use std::collections::HashSet;

use fd_core::{AdapterId, CompId, FdResult};
use fd_model::Composition;

use crate::build;
use crate::edge::Edge;

/// An immutable snapshot of a composition's diagram structure.
///
/// Built once per draw request via [`Graph::build`]; never mutated
/// afterwards. Edge collections are sorted by edge key so that iteration
/// order (and any float summation over it) is reproducible across runs.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) components: HashSet<CompId>,
    pub(crate) adapters: HashSet<AdapterId>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) direct_edges: Vec<Edge>,
    pub(crate) simple_edges: Vec<(CompId, CompId)>,
}

impl Graph {
    /// Extract the graph of a composition, omitting the excluded components
    /// and every edge that would terminate on one of them.
    ///
    /// Fails if `excluded` names a component that does not exist.
    pub fn build(composition: &Composition, excluded: &HashSet<CompId>) -> FdResult<Self> {
        build::build(composition, excluded)
    }

    /// All non-excluded components.
    pub fn components(&self) -> &HashSet<CompId> {
        &self.components
    }

    /// All adapters discovered while tracing component wiring.
    pub fn adapters(&self) -> &HashSet<AdapterId> {
        &self.adapters
    }

    /// The full edge set, including component/adapter boundary edges and
    /// adapter-to-adapter hops. Used when adapters are rendered individually.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Component-to-component edges with adapter chains collapsed; each
    /// carries the chain length in `hops`.
    pub fn direct_edges(&self) -> &[Edge] {
        &self.direct_edges
    }

    /// Deduplicated ordered component pairs derived from `direct_edges`,
    /// one entry per drawable connector.
    pub fn simple_edges(&self) -> &[(CompId, CompId)] {
        &self.simple_edges
    }

    /// Number of nodes a layout at the given detail would place.
    pub fn node_count(&self, include_adapters: bool) -> usize {
        if include_adapters {
            self.components.len() + self.adapters.len()
        } else {
            self.components.len()
        }
    }
}
