//! Grid positions and the position map.

use std::collections::HashMap;

use fd_graph::NodeRef;

/// An integer grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

/// Mapping from diagram node to grid cell.
///
/// Produced by the optimizer, or supplied by a caller that wants to skip
/// optimization. A plain mutable value: a renderer may patch individual
/// entries (interactive re-arrangement) without re-running extraction or
/// layout.
pub type PositionMap = HashMap<NodeRef, GridPos>;
