//! Randomized local search for node placement.

use fd_core::CompId;
use fd_graph::{Edge, Graph, NodeRef};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::position::{GridPos, PositionMap};
use crate::score;

/// Iterations granted before the stagnation rule may fire.
const GRACE_ITERATIONS: usize = 2500;

/// Stop once the iteration index exceeds this multiple of the last
/// strict improvement.
const STALL_FACTOR: usize = 4;

/// Level of edge detail the layout is optimized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    /// Components only; Manhattan scoring over deduplicated pairs.
    Collapsed,
    /// Components only; directional scoring over collapsed edges.
    #[default]
    Direct,
    /// Components and adapters; directional scoring over all edges.
    Expanded,
}

impl Detail {
    /// Whether adapters get their own grid cells.
    pub fn includes_adapters(self) -> bool {
        matches!(self, Detail::Expanded)
    }
}

/// Layout search configuration.
pub struct LayoutConfig {
    pub detail: Detail,
    /// Maximum iterations; the stagnation rule usually stops earlier.
    pub max_iterations: usize,
    /// Fixed seed for reproducible layouts; `None` uses OS randomness.
    pub seed: Option<u64>,
    /// Grid side = ceil(sqrt(node count)) * this factor. Larger factors
    /// give the search more room to spread nodes.
    pub grid_factor: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            detail: Detail::Direct,
            max_iterations: 25_000,
            seed: None,
            grid_factor: 3,
        }
    }
}

/// Layout search outcome, including convergence diagnostics.
pub struct LayoutResult {
    /// Final node placement.
    pub positions: PositionMap,
    /// Iterations actually run.
    pub iterations: usize,
    /// Final score (lower is better).
    pub score: f64,
    /// Score after every accepted iteration, starting with the initial
    /// placement. Non-increasing by construction.
    pub history: Vec<f64>,
}

/// Occupancy grid: which node, if any, sits in each cell.
#[derive(Clone)]
struct OccupancyGrid {
    size: usize,
    cells: Vec<Option<NodeRef>>,
}

impl OccupancyGrid {
    fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    fn get(&self, p: GridPos) -> Option<NodeRef> {
        self.cells[p.x as usize * self.size + p.y as usize]
    }

    fn set(&mut self, p: GridPos, node: Option<NodeRef>) {
        self.cells[p.x as usize * self.size + p.y as usize] = node;
    }
}

/// Scored edge set for one optimization run.
enum ScoreMode<'a> {
    Directional(&'a [Edge]),
    Manhattan(&'a [(CompId, CompId)]),
}

impl ScoreMode<'_> {
    fn rate(&self, pos: &PositionMap) -> f64 {
        match self {
            ScoreMode::Directional(edges) => score::rate_directional(pos, edges),
            ScoreMode::Manhattan(pairs) => score::rate_manhattan(pos, pairs),
        }
    }
}

/// Optimize node placement for a graph, returning the position map.
pub fn optimize(graph: &Graph, config: &LayoutConfig) -> PositionMap {
    optimize_with_stats(graph, config).positions
}

/// Optimize node placement, also reporting convergence diagnostics.
pub fn optimize_with_stats(graph: &Graph, config: &LayoutConfig) -> LayoutResult {
    let nodes = candidate_nodes(graph, config.detail);
    if nodes.is_empty() {
        return LayoutResult {
            positions: PositionMap::new(),
            iterations: 0,
            score: 0.0,
            history: Vec::new(),
        };
    }

    let mode = match config.detail {
        Detail::Collapsed => ScoreMode::Manhattan(graph.simple_edges()),
        Detail::Direct => ScoreMode::Directional(graph.direct_edges()),
        Detail::Expanded => ScoreMode::Directional(graph.edges()),
    };

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let size = (nodes.len() as f64).sqrt().ceil() as usize * config.grid_factor.max(1);
    let (mut grid, mut pos) = random_initial_positions(&nodes, size, &mut rng);

    debug!(
        nodes = nodes.len(),
        grid = size,
        max_iterations = config.max_iterations,
        "optimizing graph layout"
    );

    let mut current = mode.rate(&pos);
    let mut history = vec![current];
    let mut last_improvement = 0;
    let mut iterations = 0;

    for i in 0..config.max_iterations {
        iterations = i + 1;

        let mut pos_new = pos.clone();
        let mut grid_new = grid.clone();

        for _ in 0..rng.random_range(1..5) {
            relocate_random_node(&nodes, size, &mut grid_new, &mut pos_new, &mut rng);
        }

        let proposed = mode.rate(&pos_new);
        if proposed <= current {
            if proposed < current {
                last_improvement = i;
            }
            pos = pos_new;
            grid = grid_new;
            current = proposed;
            history.push(current);
        }

        if i > GRACE_ITERATIONS && i > STALL_FACTOR * last_improvement {
            break;
        }
    }

    debug!(iterations, score = current, "layout optimization finished");

    LayoutResult {
        positions: pos,
        iterations,
        score: current,
        history,
    }
}

/// Candidate nodes in a stable order: components before adapters, each
/// group by ID. The search indexes into this list, so a fixed seed walks
/// the same node sequence every run.
fn candidate_nodes(graph: &Graph, detail: Detail) -> Vec<NodeRef> {
    let mut nodes: Vec<NodeRef> = graph
        .components()
        .iter()
        .map(|&c| NodeRef::Component(c))
        .collect();
    if detail.includes_adapters() {
        nodes.extend(graph.adapters().iter().map(|&a| NodeRef::Adapter(a)));
    }
    nodes.sort_unstable();
    nodes
}

/// Assign every node a distinct random cell by rejection sampling.
fn random_initial_positions(
    nodes: &[NodeRef],
    size: usize,
    rng: &mut StdRng,
) -> (OccupancyGrid, PositionMap) {
    let mut grid = OccupancyGrid::new(size);
    let mut pos = PositionMap::with_capacity(nodes.len());

    for &node in nodes {
        loop {
            let p = GridPos {
                x: rng.random_range(0..size) as i32,
                y: rng.random_range(0..size) as i32,
            };
            if grid.get(p).is_none() {
                grid.set(p, Some(node));
                pos.insert(node, p);
                break;
            }
        }
    }

    (grid, pos)
}

/// Move one random node to one random cell.
///
/// If the cell holds a different node the two swap; if it is empty the
/// node moves and frees its old cell; if it already holds the chosen node
/// nothing happens. Occupancy stays consistent in all three cases.
fn relocate_random_node(
    nodes: &[NodeRef],
    size: usize,
    grid: &mut OccupancyGrid,
    pos: &mut PositionMap,
    rng: &mut StdRng,
) {
    let node = nodes[rng.random_range(0..nodes.len())];
    let target = GridPos {
        x: rng.random_range(0..size) as i32,
        y: rng.random_range(0..size) as i32,
    };

    let Some(&old) = pos.get(&node) else { return };

    match grid.get(target) {
        Some(here) if here == node => {}
        Some(here) => {
            grid.set(old, Some(here));
            grid.set(target, Some(node));
            pos.insert(here, old);
            pos.insert(node, target);
        }
        None => {
            grid.set(old, None);
            grid.set(target, Some(node));
            pos.insert(node, target);
        }
    }
}
