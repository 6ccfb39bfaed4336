//! Bidirectional A* pathfinding across the levels of a multi-level grid.
//!
//! Levels are connected only through lifts and escalators. The crate turns
//! those cells into directed [`Waypoint`]s and searches with two frontiers
//! at once, one from each endpoint, stopping at the first position both
//! have reached.
//!
//! - [`build_waypoints`] / [`WaypointIndex`] derive inter-level transitions
//! - [`NeighborProvider`] enumerates planar moves and matching waypoints
//! - [`BidirectionalSearch`] runs the paired frontier expansion
//! - [`reconstruct`] joins the two parent chains into one [`Route`]
//!
//! Most callers only need [`find_path`]:
//!
//! ```
//! use levelnav_core::{GridModel, Pos};
//! use levelnav_paths::find_path;
//!
//! let grid = GridModel::from_text("L..\n\nL..").unwrap();
//! let route = find_path(&grid, Pos::new(2, 0, 0), Pos::new(2, 0, 1)).unwrap();
//! assert_eq!(route.cost, 5.0);
//! ```
//!
//! # Costs
//!
//! | Move | Cost |
//! |---|---|
//! | planar step | 1 |
//! | lift ride, any distance | 1 |
//! | escalator, adjacent levels | 0.5 |
//! | escalator, otherwise | 2 |
//!
//! The heuristic charges one unit per level, which overestimates escalator
//! rides, so routes using escalators are not guaranteed to be the cheapest.

mod distance;
mod error;
mod frontier;
mod neighbors;
mod options;
mod reconstruct;
mod search;
mod waypoint;

pub use distance::manhattan;
pub use error::{CoordinateIssue, PathError};
pub use frontier::{Chain, Direction, Frontier, NodeId, SearchNode};
pub use neighbors::{Edge, NeighborProvider, STEP_COST};
pub use options::{CancelToken, SearchOptions};
pub use reconstruct::{Route, reconstruct};
pub use search::{BidirectionalSearch, SearchState, SearchStats};
pub use waypoint::{LIFT_COST, TransitionKind, Waypoint, WaypointIndex, build_waypoints, escalator_cost};

use levelnav_core::{GridModel, Pos};

/// Find a route from `start` to `goal` with default [`SearchOptions`].
///
/// Builds a fresh [`WaypointIndex`] for `grid`; callers running many
/// searches on the same grid should build one and use [`find_path_with`].
pub fn find_path(grid: &GridModel, start: Pos, goal: Pos) -> Result<Route, PathError> {
    let waypoints = WaypointIndex::build(grid);
    find_path_with(grid, &waypoints, start, goal, &SearchOptions::default())
}

/// Find a route from `start` to `goal` using a prebuilt waypoint index.
///
/// Endpoints are checked first, then `start == goal` short-circuits to a
/// single-position route of cost 0 without searching. Waypoint consistency
/// is checked next when [`SearchOptions::validate_waypoints`] is set.
pub fn find_path_with(
    grid: &GridModel,
    waypoints: &WaypointIndex,
    start: Pos,
    goal: Pos,
    options: &SearchOptions,
) -> Result<Route, PathError> {
    check_endpoint(grid, start)?;
    check_endpoint(grid, goal)?;
    if start == goal {
        return Ok(Route::stay(start));
    }
    if options.validate_waypoints {
        waypoints.validate()?;
    }
    BidirectionalSearch::new(grid, waypoints, start, goal, options).run()
}

fn check_endpoint(grid: &GridModel, p: Pos) -> Result<(), PathError> {
    let issue = match grid.terrain(p) {
        None => CoordinateIssue::OutOfBounds,
        Some(t) if !t.passable() => CoordinateIssue::Wall,
        Some(_) => return Ok(()),
    };
    Err(PathError::InvalidCoordinate { pos: p, issue })
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn route_round_trip() {
        let grid = GridModel::from_text("L.\n\nL.").unwrap();
        let route = find_path(&grid, Pos::new(1, 0, 0), Pos::new(1, 0, 1)).unwrap();
        let json = serde_json::to_string(&route).unwrap();
        let back: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(back, route);
    }

    #[test]
    fn waypoint_round_trip() {
        let grid = GridModel::from_text("E\n\nE").unwrap();
        let wps = build_waypoints(&grid);
        let json = serde_json::to_string(&wps).unwrap();
        let back: Vec<Waypoint> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wps);
    }
}
