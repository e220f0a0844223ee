//! Graph edges and their identity rule.

use std::hash::{Hash, Hasher};

use fd_core::{AdapterId, CompId};

/// Reference to a diagram node: a component or an adapter.
///
/// The variant order matters: sorting groups components before adapters,
/// which gives the layout search its stable node ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeRef {
    Component(CompId),
    Adapter(AdapterId),
}

/// A directed edge between two diagram nodes.
///
/// Slot names are `None` on adapter endpoints (adapters have no named
/// slots). `out_index`/`in_index` give the slot's position within its
/// component's ordered slot list; `hops` counts the adapters collapsed into
/// this edge (0 for a direct wire).
///
/// Identity is defined by [`EdgeKey`]: two edges with the same endpoints and
/// slot names are the same edge even when their indices or hop counts
/// differ. Inserting into a keyed collection therefore overwrites
/// (last writer wins). This rule can merge distinct parallel edges between
/// identically named slots; rendered edge counts depend on it, so it is
/// kept as-is.
#[derive(Debug, Clone)]
pub struct Edge {
    pub source: NodeRef,
    pub out_slot: Option<String>,
    pub out_index: usize,
    pub target: NodeRef,
    pub in_slot: Option<String>,
    pub in_index: usize,
    pub hops: usize,
}

/// The identity-carrying subset of an edge's fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub source: NodeRef,
    pub out_slot: Option<String>,
    pub target: NodeRef,
    pub in_slot: Option<String>,
}

impl Edge {
    /// Extract this edge's identity key.
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            source: self.source,
            out_slot: self.out_slot.clone(),
            target: self.target,
            in_slot: self.in_slot.clone(),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.out_slot == other.out_slot
            && self.target == other.target
            && self.in_slot == other.in_slot
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.out_slot.hash(state);
        self.target.hash(state);
        self.in_slot.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fd_core::Id;

    fn edge(hops: usize, in_index: usize) -> Edge {
        Edge {
            source: NodeRef::Component(Id::from_index(0)),
            out_slot: Some("Out".into()),
            out_index: 0,
            target: NodeRef::Component(Id::from_index(1)),
            in_slot: Some("In".into()),
            in_index,
            hops,
        }
    }

    #[test]
    fn identity_ignores_payload_fields() {
        // Same endpoints and slot names, different hop count and index.
        let a = edge(0, 0);
        let b = edge(3, 7);
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn identity_distinguishes_slot_names() {
        let a = edge(0, 0);
        let mut b = edge(0, 0);
        b.in_slot = Some("Other".into());
        assert_ne!(a, b);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn node_ref_sorts_components_first() {
        let c = NodeRef::Component(Id::from_index(9));
        let a = NodeRef::Adapter(Id::from_index(0));
        assert!(c < a);
    }
}
