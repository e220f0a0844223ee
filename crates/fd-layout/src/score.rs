//! Layout scoring (lower is better).

use fd_core::CompId;
use fd_graph::{Edge, NodeRef};

use crate::position::PositionMap;

/// Directional score over an edge list.
///
/// Per edge, with `p1 = pos[source]` and `p2 = pos[target]`:
/// - `dx = p2.x - (p1.x + 1)` assumes one grid cell of box width, so a
///   target exactly one cell to the right costs nothing
/// - a backward edge doubles its horizontal cost, plus a fixed penalty of
///   5 when both ends share a row (overlapping arrows look worst)
/// - vertical offset is free within half a row (adjacent rows cost nothing)
///
/// The summed contributions are squared: a few bad edges outweigh many
/// mediocre ones, steering the search toward eliminating worst offenders.
pub(crate) fn rate_directional(pos: &PositionMap, edges: &[Edge]) -> f64 {
    let mut score = 0.0;

    for e in edges {
        let (Some(p1), Some(p2)) = (pos.get(&e.source), pos.get(&e.target)) else {
            continue;
        };

        let dx = f64::from(p2.x - (p1.x + 1));
        let mut sc_x = dx;
        let mut sc_rev_same_row = 0.0;
        if dx < 0.0 {
            sc_x *= 2.0;
            if p1.y == p2.y {
                sc_rev_same_row = 5.0;
            }
        }

        let dy = f64::from((p2.y - p1.y).abs());
        score += sc_x.abs() + (dy - 0.5).max(0.0) + sc_rev_same_row;
    }

    score * score
}

/// Simplified score for collapsed rendering: plain Manhattan distance over
/// deduplicated component pairs, squared like the directional variant.
pub(crate) fn rate_manhattan(pos: &PositionMap, pairs: &[(CompId, CompId)]) -> f64 {
    let mut score = 0.0;

    for &(src, trg) in pairs {
        let p1 = pos.get(&NodeRef::Component(src));
        let p2 = pos.get(&NodeRef::Component(trg));
        let (Some(p1), Some(p2)) = (p1, p2) else {
            continue;
        };
        score += f64::from((p2.x - p1.x).abs() + (p2.y - p1.y).abs());
    }

    score * score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::GridPos;
    use fd_core::Id;

    fn pos(x: i32, y: i32) -> GridPos {
        GridPos { x, y }
    }

    fn one_edge() -> Vec<Edge> {
        vec![Edge {
            source: NodeRef::Component(Id::from_index(0)),
            out_slot: Some("Out".into()),
            out_index: 0,
            target: NodeRef::Component(Id::from_index(1)),
            in_slot: Some("In".into()),
            in_index: 0,
            hops: 0,
        }]
    }

    fn map(p1: GridPos, p2: GridPos) -> PositionMap {
        let mut m = PositionMap::new();
        m.insert(NodeRef::Component(Id::from_index(0)), p1);
        m.insert(NodeRef::Component(Id::from_index(1)), p2);
        m
    }

    #[test]
    fn ideal_placement_scores_zero() {
        // Target one cell to the right, same row.
        let m = map(pos(0, 0), pos(1, 0));
        assert_eq!(rate_directional(&m, &one_edge()), 0.0);
    }

    #[test]
    fn adjacent_row_is_free_vertically() {
        let m = map(pos(0, 0), pos(1, 1));
        // dx = 0, dy = 1 -> vertical term 0.5, squared.
        assert_eq!(rate_directional(&m, &one_edge()), 0.25);
    }

    #[test]
    fn backward_edge_is_doubled() {
        // Target directly above-left: dx = -2, different rows.
        let m = map(pos(2, 0), pos(1, 1));
        // |(-2)*2| + (1 - 0.5) = 4.5, squared.
        assert_eq!(rate_directional(&m, &one_edge()), 4.5 * 4.5);
    }

    #[test]
    fn same_row_reversal_gets_fixed_penalty() {
        let m = map(pos(2, 0), pos(1, 0));
        // dx = -2 -> |−4| + 0 + 5 = 9, squared.
        assert_eq!(rate_directional(&m, &one_edge()), 81.0);
    }

    #[test]
    fn self_loop_contributes_fixed_score_not_error() {
        let mut e = one_edge();
        e[0].target = e[0].source;
        let mut m = PositionMap::new();
        m.insert(NodeRef::Component(Id::from_index(0)), pos(3, 3));
        // dx = -1 -> |−2| + 0 + 5 = 7, squared.
        assert_eq!(rate_directional(&m, &e), 49.0);
    }

    #[test]
    fn manhattan_counts_both_axes() {
        let m = map(pos(0, 0), pos(2, 3));
        let pairs = vec![(Id::from_index(0), Id::from_index(1))];
        assert_eq!(rate_manhattan(&m, &pairs), 25.0);
    }
}
