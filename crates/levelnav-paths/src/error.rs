use std::fmt;

use levelnav_core::Pos;

use crate::waypoint::TransitionKind;

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateIssue {
    OutOfBounds,
    Wall,
}

/// Errors returned by [`find_path`](crate::find_path).
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// Both frontiers were exhausted without meeting.
    NoPathFound,
    /// The start or goal is outside the grid or on a wall.
    InvalidCoordinate { pos: Pos, issue: CoordinateIssue },
    /// A lift or escalator cell has no counterpart on another level.
    InconsistentWaypoint { pos: Pos, kind: TransitionKind },
    /// The search was cancelled through its [`CancelToken`](crate::CancelToken).
    Cancelled,
    /// The search ran past its deadline.
    DeadlineExceeded,
    /// The search ran out of paired iterations.
    IterationLimit { iterations: u32 },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPathFound => write!(f, "no path found"),
            Self::InvalidCoordinate { pos, issue } => match issue {
                CoordinateIssue::OutOfBounds => write!(f, "coordinate {pos} is outside the grid"),
                CoordinateIssue::Wall => write!(f, "coordinate {pos} is a wall"),
            },
            Self::InconsistentWaypoint { pos, kind } => {
                write!(f, "{kind} at {pos} has no counterpart on another level")
            }
            Self::Cancelled => write!(f, "search cancelled"),
            Self::DeadlineExceeded => write!(f, "search deadline exceeded"),
            Self::IterationLimit { iterations } => {
                write!(f, "search gave up after {iterations} iterations")
            }
        }
    }
}

impl std::error::Error for PathError {}
