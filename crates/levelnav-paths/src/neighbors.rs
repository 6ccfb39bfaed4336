use std::collections::HashMap;

use levelnav_core::{GridModel, Pos};

use crate::waypoint::WaypointIndex;

/// Cost of a single planar step.
pub const STEP_COST: f32 = 1.0;

/// An outgoing edge: the position reached and what it costs to get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: Pos,
    pub cost: f32,
}

/// Memoized neighbor computation for one search call.
///
/// Planar neighbors come first (down, right, up, left; walls and
/// out-of-bounds cells dropped), then the waypoints leaving the position.
/// The cache lives as long as the provider, so a provider must not outlive
/// the search that created it.
pub struct NeighborProvider<'a> {
    grid: &'a GridModel,
    waypoints: &'a WaypointIndex,
    cache: HashMap<Pos, Vec<Edge>>,
}

impl<'a> NeighborProvider<'a> {
    /// Create a provider with an empty cache.
    pub fn new(grid: &'a GridModel, waypoints: &'a WaypointIndex) -> Self {
        Self {
            grid,
            waypoints,
            cache: HashMap::new(),
        }
    }

    /// Outgoing edges of `p`.
    pub fn neighbors(&mut self, p: Pos) -> &[Edge] {
        let grid = self.grid;
        let waypoints = self.waypoints;
        self.cache
            .entry(p)
            .or_insert_with(|| compute(grid, waypoints, p))
            .as_slice()
    }

    /// Number of positions computed so far.
    #[inline]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

fn compute(grid: &GridModel, waypoints: &WaypointIndex, p: Pos) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(4);
    for n in p.neighbors_4() {
        if grid.is_passable(n) {
            edges.push(Edge {
                to: n,
                cost: STEP_COST,
            });
        }
    }
    for w in waypoints.from_origin(p) {
        edges.push(Edge {
            to: w.destination(),
            cost: w.cost,
        });
    }
    edges
}
