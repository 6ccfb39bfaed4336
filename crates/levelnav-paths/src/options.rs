use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Shared flag used to abort a running search from elsewhere.
///
/// Clones share the same flag. The search checks it once per paired
/// iteration.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-call search configuration.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Abort with [`PathError::Cancelled`](crate::PathError::Cancelled)
    /// once this token is tripped.
    pub cancel: Option<CancelToken>,
    /// Abort with [`PathError::DeadlineExceeded`](crate::PathError::DeadlineExceeded)
    /// once the search has run this long.
    pub deadline: Option<Duration>,
    /// Abort with [`PathError::IterationLimit`](crate::PathError::IterationLimit)
    /// after this many paired iterations.
    pub max_iterations: Option<u32>,
    /// Reject grids with lone lift cells or unpaired escalators before
    /// searching.
    pub validate_waypoints: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            cancel: None,
            deadline: None,
            max_iterations: None,
            validate_waypoints: true,
        }
    }
}

impl SearchOptions {
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn with_waypoint_validation(mut self, on: bool) -> Self {
        self.validate_waypoints = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let a = CancelToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
    }

    #[test]
    fn defaults_validate_without_limits() {
        let o = SearchOptions::default();
        assert!(o.validate_waypoints);
        assert!(o.cancel.is_none());
        assert!(o.deadline.is_none());
        assert!(o.max_iterations.is_none());
    }
}
