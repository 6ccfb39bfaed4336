//! Route selection session: pick a start and a goal by label, get a route.

use levelnav_core::Pos;
use levelnav_paths::{PathError, Route, SearchOptions, WaypointIndex, find_path_with};

use crate::labels::LabelError;
use crate::layout::Building;

/// Result of planning between the selected labels.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Found(Route),
    /// The search ended without a route. [`PathError::NoPathFound`] is the
    /// ordinary case; other errors point at a broken building.
    NoRoute(PathError),
}

impl RouteOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(r) => Some(r),
            RouteOutcome::NoRoute(_) => None,
        }
    }
}

/// Holds a building, the current start/goal selection, and the outcome of
/// the last search. Changing either endpoint forgets the outcome.
pub struct RoutePlanner {
    building: Building,
    waypoints: WaypointIndex,
    options: SearchOptions,
    start: Option<String>,
    goal: Option<String>,
    outcome: Option<RouteOutcome>,
}

impl RoutePlanner {
    pub fn new(building: Building) -> Self {
        Self::with_options(building, SearchOptions::default())
    }

    pub fn with_options(building: Building, options: SearchOptions) -> Self {
        let waypoints = WaypointIndex::build(&building.grid);
        Self {
            building,
            waypoints,
            options,
            start: None,
            goal: None,
            outcome: None,
        }
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    /// Select the start label. Unknown labels leave the selection unchanged.
    pub fn select_start(&mut self, label: &str) -> Result<Pos, LabelError> {
        let pos = self.building.labels.resolve(label)?;
        self.start = Some(label.to_string());
        self.outcome = None;
        Ok(pos)
    }

    /// Select the goal label. Unknown labels leave the selection unchanged.
    pub fn select_goal(&mut self, label: &str) -> Result<Pos, LabelError> {
        let pos = self.building.labels.resolve(label)?;
        self.goal = Some(label.to_string());
        self.outcome = None;
        Ok(pos)
    }

    /// The outcome for the current selection, searching on first request.
    /// `None` until both endpoints are selected.
    pub fn route(&mut self) -> Option<&RouteOutcome> {
        if self.outcome.is_none() {
            let start = self.building.labels.get(self.start.as_deref()?)?;
            let goal = self.building.labels.get(self.goal.as_deref()?)?;
            let outcome = match find_path_with(
                &self.building.grid,
                &self.waypoints,
                start,
                goal,
                &self.options,
            ) {
                Ok(route) => RouteOutcome::Found(route),
                Err(e) => {
                    log::info!("no route from {start} to {goal}: {e}");
                    RouteOutcome::NoRoute(e)
                }
            };
            self.outcome = Some(outcome);
        }
        self.outcome.as_ref()
    }

    /// The last computed outcome, without searching.
    pub fn outcome(&self) -> Option<&RouteOutcome> {
        self.outcome.as_ref()
    }
}
