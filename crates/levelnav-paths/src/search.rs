//! The bidirectional search driver.

use std::time::Instant;

use levelnav_core::{GridModel, Pos};

use crate::error::PathError;
use crate::frontier::{Direction, Frontier};
use crate::neighbors::NeighborProvider;
use crate::options::SearchOptions;
use crate::reconstruct::{Route, reconstruct};
use crate::waypoint::WaypointIndex;

/// Lifecycle of a [`BidirectionalSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Created, nothing expanded yet.
    Init,
    /// Paired iterations are running.
    Expanding,
    /// The frontiers met at this position.
    MeetingFound(Pos),
    /// A route was produced or the search failed.
    Done,
}

/// Counters describing one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Paired iterations started.
    pub iterations: u32,
    pub forward_expanded: u32,
    pub backward_expanded: u32,
    /// Distinct positions whose neighbors were computed.
    pub neighbor_queries: usize,
}

/// Outcome of advancing one frontier by one node.
enum HalfStep {
    Exhausted,
    Met(Pos),
    Expanded,
}

/// Two A* frontiers growing toward each other: forward from the start,
/// guided toward the goal, and backward from the goal, guided toward the
/// start. The search stops at the first position popped by one frontier
/// that the other has already closed.
///
/// The grid and waypoint index are borrowed for the whole search; the
/// frontiers and the neighbor cache belong to it alone.
pub struct BidirectionalSearch<'a> {
    start: Pos,
    goal: Pos,
    forward: Frontier,
    backward: Frontier,
    neighbors: NeighborProvider<'a>,
    options: &'a SearchOptions,
    state: SearchState,
    stats: SearchStats,
    started: Option<Instant>,
}

impl<'a> BidirectionalSearch<'a> {
    /// Set up a search between two positions. Endpoints are not validated
    /// here; see [`find_path_with`](crate::find_path_with).
    pub fn new(
        grid: &'a GridModel,
        waypoints: &'a WaypointIndex,
        start: Pos,
        goal: Pos,
        options: &'a SearchOptions,
    ) -> Self {
        Self {
            start,
            goal,
            forward: Frontier::new(Direction::Forward, start, goal),
            backward: Frontier::new(Direction::Backward, goal, start),
            neighbors: NeighborProvider::new(grid, waypoints),
            options,
            state: SearchState::Init,
            stats: SearchStats::default(),
            started: None,
        }
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            forward_expanded: self.forward.expanded(),
            backward_expanded: self.backward.expanded(),
            neighbor_queries: self.neighbors.cached(),
            ..self.stats
        }
    }

    pub fn forward(&self) -> &Frontier {
        &self.forward
    }

    pub fn backward(&self) -> &Frontier {
        &self.backward
    }

    /// Run one paired iteration: a forward half-step, then, unless the
    /// frontiers met, a backward half-step.
    ///
    /// Returns the state reached. Once the state is
    /// [`MeetingFound`](SearchState::MeetingFound) or
    /// [`Done`](SearchState::Done), further calls change nothing.
    pub fn step(&mut self) -> Result<SearchState, PathError> {
        match self.state {
            SearchState::MeetingFound(_) | SearchState::Done => return Ok(self.state),
            SearchState::Init => {
                self.started = Some(Instant::now());
                self.state = SearchState::Expanding;
            }
            SearchState::Expanding => {}
        }

        if let Err(e) = self.check_abort() {
            self.state = SearchState::Done;
            return Err(e);
        }
        if self.forward.is_exhausted() || self.backward.is_exhausted() {
            self.state = SearchState::Done;
            return Err(PathError::NoPathFound);
        }
        self.stats.iterations += 1;

        for direction in [Direction::Forward, Direction::Backward] {
            let (own, other) = match direction {
                Direction::Forward => (&mut self.forward, &self.backward),
                Direction::Backward => (&mut self.backward, &self.forward),
            };
            match half_step(own, other, &mut self.neighbors) {
                HalfStep::Exhausted => {
                    self.state = SearchState::Done;
                    return Err(PathError::NoPathFound);
                }
                HalfStep::Met(p) => {
                    log::trace!("{direction:?} frontier met the other at {p}");
                    self.state = SearchState::MeetingFound(p);
                    return Ok(self.state);
                }
                HalfStep::Expanded => {}
            }
        }
        Ok(self.state)
    }

    /// Drive the search to completion and build the route.
    pub fn run(mut self) -> Result<Route, PathError> {
        let meeting = loop {
            match self.step() {
                Ok(SearchState::MeetingFound(p)) => break p,
                Ok(_) => {}
                Err(e) => {
                    log::debug!(
                        "search {} -> {} failed: {e} ({:?})",
                        self.start,
                        self.goal,
                        self.stats()
                    );
                    return Err(e);
                }
            }
        };
        let route = self.finish(meeting)?;
        log::debug!(
            "search {} -> {}: {} steps, cost {}, met at {meeting} ({:?})",
            self.start,
            self.goal,
            route.steps(),
            route.cost,
            self.stats()
        );
        Ok(route)
    }

    /// Resolve the meeting position to the best-known node of each frontier
    /// and join their chains.
    fn finish(&mut self, meeting: Pos) -> Result<Route, PathError> {
        self.state = SearchState::Done;
        let (Some(f), Some(b)) = (self.forward.best(meeting), self.backward.best(meeting)) else {
            return Err(PathError::NoPathFound);
        };
        reconstruct(&self.forward, f, &self.backward, b).ok_or(PathError::NoPathFound)
    }

    fn check_abort(&self) -> Result<(), PathError> {
        if self
            .options
            .cancel
            .as_ref()
            .is_some_and(|t| t.is_cancelled())
        {
            return Err(PathError::Cancelled);
        }
        if let (Some(deadline), Some(started)) = (self.options.deadline, self.started) {
            if started.elapsed() >= deadline {
                return Err(PathError::DeadlineExceeded);
            }
        }
        if let Some(max) = self.options.max_iterations {
            if self.stats.iterations >= max {
                return Err(PathError::IterationLimit {
                    iterations: self.stats.iterations,
                });
            }
        }
        Ok(())
    }
}

/// Pop `own`'s best node; report a meeting if `other` already closed its
/// position, otherwise close it and relax its neighbors.
fn half_step(own: &mut Frontier, other: &Frontier, neighbors: &mut NeighborProvider) -> HalfStep {
    let Some((id, pos)) = own.pop() else {
        return HalfStep::Exhausted;
    };
    if other.is_closed(pos) {
        return HalfStep::Met(pos);
    }
    own.expand(id, neighbors.neighbors(pos));
    HalfStep::Expanded
}
