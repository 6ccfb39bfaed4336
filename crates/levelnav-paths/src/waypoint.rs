//! Inter-level transitions derived from lift and escalator cells.

use std::collections::HashMap;
use std::fmt;

use levelnav_core::{GridModel, Pos, Terrain};

use crate::error::PathError;

/// Cost of any lift ride, however many levels it spans.
pub const LIFT_COST: f32 = 1.0;

/// The kind of vertical transition a [`Waypoint`] models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionKind {
    Lift,
    Escalator,
}

impl TransitionKind {
    /// Traversal cost for a transition spanning `level_diff` levels.
    pub fn cost(self, level_diff: i32) -> f32 {
        match self {
            TransitionKind::Lift => LIFT_COST,
            TransitionKind::Escalator => escalator_cost(level_diff),
        }
    }

    fn terrain(self) -> Terrain {
        match self {
            TransitionKind::Lift => Terrain::Lift,
            TransitionKind::Escalator => Terrain::Escalator,
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.terrain(), f)
    }
}

/// Escalator cost: 0.5 between adjacent levels, 2 otherwise.
#[inline]
pub fn escalator_cost(level_diff: i32) -> f32 {
    if level_diff.abs() == 1 { 0.5 } else { 2.0 }
}

/// A directed edge from `(x, y, from_level)` to `(x, y, to_level)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub x: i32,
    pub y: i32,
    pub from_level: i32,
    pub to_level: i32,
    pub cost: f32,
    pub kind: TransitionKind,
}

impl Waypoint {
    fn new(x: i32, y: i32, from_level: i32, to_level: i32, kind: TransitionKind) -> Self {
        Self {
            x,
            y,
            from_level,
            to_level,
            cost: kind.cost(to_level - from_level),
            kind,
        }
    }

    /// Where the transition starts.
    #[inline]
    pub fn origin(&self) -> Pos {
        Pos::new(self.x, self.y, self.from_level)
    }

    /// Where the transition ends.
    #[inline]
    pub fn destination(&self) -> Pos {
        Pos::new(self.x, self.y, self.to_level)
    }
}

/// Scan `grid` for transitions. See [`WaypointIndex::build`] for the rules.
pub fn build_waypoints(grid: &GridModel) -> Vec<Waypoint> {
    WaypointIndex::build(grid).waypoints
}

/// The list of waypoints of a grid plus a lookup by origin.
///
/// Built once per grid and shared read-only by any number of searches.
#[derive(Debug, Clone, Default)]
pub struct WaypointIndex {
    waypoints: Vec<Waypoint>,
    by_origin: HashMap<Pos, Vec<usize>>,
    inconsistencies: Vec<(Pos, TransitionKind)>,
}

impl WaypointIndex {
    /// Derive the transitions of `grid`.
    ///
    /// - An escalator with another escalator directly above it yields one
    ///   edge going up. No edge is generated going down.
    /// - A lift column yields an edge between every ordered pair of distinct
    ///   levels it appears on.
    ///
    /// Escalator edges come first in scan order (level, row, column), then
    /// lift edges grouped by column in order of first appearance. Lone lift
    /// cells and unpaired escalators produce no edges; they are logged and
    /// reported by [`validate`](Self::validate).
    pub fn build(grid: &GridModel) -> Self {
        let mut waypoints = Vec::new();
        let mut inconsistencies = Vec::new();
        let mut lift_columns: Vec<((i32, i32), Vec<i32>)> = Vec::new();
        let mut lift_slots: HashMap<(i32, i32), usize> = HashMap::new();

        for (p, t) in grid.iter() {
            match t {
                Terrain::Escalator => {
                    let above = grid.terrain(p.on_level(p.level + 1)) == Some(Terrain::Escalator);
                    let below = grid.terrain(p.on_level(p.level - 1)) == Some(Terrain::Escalator);
                    if above {
                        waypoints.push(Waypoint::new(
                            p.x,
                            p.y,
                            p.level,
                            p.level + 1,
                            TransitionKind::Escalator,
                        ));
                    } else if !below {
                        inconsistencies.push((p, TransitionKind::Escalator));
                    }
                }
                Terrain::Lift => {
                    let slot = *lift_slots.entry((p.x, p.y)).or_insert_with(|| {
                        lift_columns.push(((p.x, p.y), Vec::new()));
                        lift_columns.len() - 1
                    });
                    lift_columns[slot].1.push(p.level);
                }
                _ => {}
            }
        }

        for ((x, y), levels) in &lift_columns {
            if levels.len() < 2 {
                inconsistencies.push((Pos::new(*x, *y, levels[0]), TransitionKind::Lift));
                continue;
            }
            for &l1 in levels {
                for &l2 in levels {
                    if l1 != l2 {
                        waypoints.push(Waypoint::new(*x, *y, l1, l2, TransitionKind::Lift));
                    }
                }
            }
        }

        for (pos, kind) in &inconsistencies {
            log::warn!("{kind} at {pos} has no counterpart on another level");
        }

        let mut by_origin: HashMap<Pos, Vec<usize>> = HashMap::new();
        for (i, w) in waypoints.iter().enumerate() {
            by_origin.entry(w.origin()).or_default().push(i);
        }

        log::debug!(
            "waypoint index: {} edges over {} origins",
            waypoints.len(),
            by_origin.len()
        );

        Self {
            waypoints,
            by_origin,
            inconsistencies,
        }
    }

    /// All waypoints, in emission order.
    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the grid has no transitions at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Waypoints starting exactly at `p`, in emission order.
    pub fn from_origin(&self, p: Pos) -> impl Iterator<Item = &Waypoint> + '_ {
        self.by_origin
            .get(&p)
            .into_iter()
            .flatten()
            .map(|&i| &self.waypoints[i])
    }

    /// Fail with [`PathError::InconsistentWaypoint`] for the first lone lift
    /// cell or unpaired escalator found while building.
    pub fn validate(&self) -> Result<(), PathError> {
        match self.inconsistencies.first() {
            Some(&(pos, kind)) => Err(PathError::InconsistentWaypoint { pos, kind }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(plan: &str) -> GridModel {
        GridModel::from_text(plan).unwrap()
    }

    #[test]
    fn escalator_goes_up_only() {
        let g = grid("E.\n\nE.");
        let wps = build_waypoints(&g);
        assert_eq!(wps.len(), 1);
        let w = wps[0];
        assert_eq!(w.kind, TransitionKind::Escalator);
        assert_eq!(w.origin(), Pos::new(0, 0, 0));
        assert_eq!(w.destination(), Pos::new(0, 0, 1));
        assert_eq!(w.cost, 0.5);
        assert!(!wps.iter().any(|w| w.from_level > w.to_level));
    }

    #[test]
    fn escalator_stack_chains_upward() {
        let g = grid("E\n\nE\n\nE");
        let wps = build_waypoints(&g);
        let pairs: Vec<_> = wps.iter().map(|w| (w.from_level, w.to_level)).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
        assert!(wps.iter().all(|w| w.cost == 0.5));
    }

    #[test]
    fn escalator_cost_model() {
        assert_eq!(escalator_cost(1), 0.5);
        assert_eq!(escalator_cost(-1), 0.5);
        assert_eq!(escalator_cost(2), 2.0);
        assert_eq!(escalator_cost(3), 2.0);
        assert_eq!(TransitionKind::Escalator.cost(2), 2.0);
    }

    #[test]
    fn lift_connects_every_level_pair() {
        let g = grid(".L\n\n.L\n\n.L");
        let wps = build_waypoints(&g);
        let pairs: Vec<_> = wps.iter().map(|w| (w.from_level, w.to_level)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]);
        // Lift rides cost 1 regardless of distance.
        assert!(wps.iter().all(|w| w.cost == LIFT_COST));
    }

    #[test]
    fn lift_skipping_a_level() {
        let g = grid("L\n\n.\n\nL");
        let wps = build_waypoints(&g);
        let pairs: Vec<_> = wps.iter().map(|w| (w.from_level, w.to_level)).collect();
        assert_eq!(pairs, vec![(0, 2), (2, 0)]);
        assert_eq!(wps[0].cost, 1.0);
    }

    #[test]
    fn escalators_emitted_before_lifts() {
        let g = grid("L.E\n\nL.E");
        let kinds: Vec<_> = build_waypoints(&g).iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TransitionKind::Escalator,
                TransitionKind::Lift,
                TransitionKind::Lift
            ]
        );
    }

    #[test]
    fn lookup_by_origin() {
        let g = grid("L.E\n\nL.E");
        let idx = WaypointIndex::build(&g);
        assert_eq!(idx.len(), 3);
        let from_lift: Vec<_> = idx.from_origin(Pos::new(0, 0, 0)).collect();
        assert_eq!(from_lift.len(), 1);
        assert_eq!(from_lift[0].destination(), Pos::new(0, 0, 1));
        assert_eq!(idx.from_origin(Pos::new(2, 0, 1)).count(), 0);
        assert_eq!(idx.from_origin(Pos::new(1, 0, 0)).count(), 0);
        assert!(idx.validate().is_ok());
    }

    #[test]
    fn lone_lift_is_inconsistent() {
        let g = grid("L.\n\n..");
        let idx = WaypointIndex::build(&g);
        assert!(idx.is_empty());
        assert_eq!(
            idx.validate(),
            Err(PathError::InconsistentWaypoint {
                pos: Pos::new(0, 0, 0),
                kind: TransitionKind::Lift,
            })
        );
    }

    #[test]
    fn unpaired_escalator_is_inconsistent() {
        let g = grid("..\n\n.E");
        let idx = WaypointIndex::build(&g);
        assert_eq!(
            idx.validate(),
            Err(PathError::InconsistentWaypoint {
                pos: Pos::new(1, 0, 1),
                kind: TransitionKind::Escalator,
            })
        );
    }

    #[test]
    fn top_of_escalator_is_consistent() {
        let g = grid("E\n\nE");
        assert!(WaypointIndex::build(&g).validate().is_ok());
    }
}
