//! Plain-text drawing of a building and the current route.

use std::collections::HashSet;
use std::fmt;

use levelnav_core::{GridModel, Pos, Terrain};

use crate::planner::{RouteOutcome, RoutePlanner};

/// Rune drawn over every position on the route.
pub const PATH_RUNE: char = '*';

const LEGEND: [Terrain; 3] = [Terrain::Door, Terrain::Lift, Terrain::Escalator];

/// Display adapter drawing each level of a grid under a `Floor N` header,
/// with route positions overlaid.
pub struct Floors<'a> {
    grid: &'a GridModel,
    path: HashSet<Pos>,
}

impl<'a> Floors<'a> {
    pub fn new(grid: &'a GridModel, path: &[Pos]) -> Self {
        Self {
            grid,
            path: path.iter().copied().collect(),
        }
    }
}

impl fmt::Display for Floors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in 0..self.grid.levels() {
            if level > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Floor {}", level + 1)?;
            for y in 0..self.grid.height() {
                for x in 0..self.grid.width() {
                    let p = Pos::new(x, y, level);
                    let ch = if self.path.contains(&p) {
                        PATH_RUNE
                    } else {
                        self.grid.terrain(p).unwrap_or_default().rune()
                    };
                    write!(f, "{ch}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Draw every floor of `grid`, marking `path` positions with [`PATH_RUNE`].
pub fn render_floors(grid: &GridModel, path: &[Pos]) -> String {
    Floors::new(grid, path).to_string()
}

/// Display adapter for a whole planner screen: floors, selection, route
/// status and legend. Shows the last computed outcome; call
/// [`RoutePlanner::route`] first to search.
pub struct Session<'a> {
    planner: &'a RoutePlanner,
}

impl<'a> Session<'a> {
    pub fn new(planner: &'a RoutePlanner) -> Self {
        Self { planner }
    }
}

impl fmt::Display for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.planner.outcome();
        let path = outcome
            .and_then(RouteOutcome::route)
            .map_or(&[][..], |r| &r.path[..]);
        write!(f, "{}", Floors::new(&self.planner.building().grid, path))?;
        writeln!(f)?;
        writeln!(f, "Start: {}", self.planner.start().unwrap_or("-"))?;
        writeln!(f, "Goal: {}", self.planner.goal().unwrap_or("-"))?;
        match outcome {
            Some(RouteOutcome::Found(r)) => {
                writeln!(f, "route: {} steps, cost {}", r.steps(), r.cost)?
            }
            Some(RouteOutcome::NoRoute(e)) => writeln!(f, "no route: {e}")?,
            None => writeln!(f, "route: select a start and a goal")?,
        }
        writeln!(f, "Legend:")?;
        for t in LEGEND {
            writeln!(f, "  {} - {}", t.rune(), capitalized(t))?;
        }
        Ok(())
    }
}

/// Draw the full planner screen.
pub fn render_session(planner: &RoutePlanner) -> String {
    Session::new(planner).to_string()
}

fn capitalized(t: Terrain) -> String {
    let name = t.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => name,
    }
}
