use levelnav_core::Pos;

use crate::frontier::{Frontier, NodeId};

/// A path found by [`find_path`](crate::find_path).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Every position from start to goal, both included.
    pub path: Vec<Pos>,
    /// Total traversal cost.
    pub cost: f32,
}

impl Route {
    /// The route that stays put at `p`.
    pub fn stay(p: Pos) -> Self {
        Self {
            path: vec![p],
            cost: 0.0,
        }
    }

    /// Number of moves, i.e. positions minus one.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Number of moves that change level.
    pub fn transitions(&self) -> usize {
        self.path
            .windows(2)
            .filter(|w| w[0].level != w[1].level)
            .count()
    }

    pub fn start(&self) -> Option<Pos> {
        self.path.first().copied()
    }

    pub fn goal(&self) -> Option<Pos> {
        self.path.last().copied()
    }
}

/// Join the forward chain ending at `fwd` and the backward chain ending at
/// `bwd`.
///
/// The forward chain runs meeting → start and is reversed; the backward
/// chain already runs meeting → goal and is appended without its first
/// element, the shared meeting position. Returns `None` when either id is
/// unknown to its frontier or the two nodes sit on different positions.
pub fn reconstruct(
    forward: &Frontier,
    fwd: NodeId,
    backward: &Frontier,
    bwd: NodeId,
) -> Option<Route> {
    let (f, b) = (forward.node(fwd)?, backward.node(bwd)?);
    if f.pos != b.pos {
        return None;
    }

    let mut path: Vec<Pos> = forward.chain(fwd).collect();
    path.reverse();
    path.extend(backward.chain(bwd).skip(1));

    Some(Route {
        path,
        cost: f.g + b.g,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::Direction;
    use crate::neighbors::Edge;

    fn step(to: Pos) -> [Edge; 1] {
        [Edge { to, cost: 1.0 }]
    }

    /// Grow a straight chain through `points` (the first one being the root)
    /// and return the id of the last node.
    fn grow(f: &mut Frontier, points: &[Pos]) -> NodeId {
        let (mut id, _) = f.pop().unwrap();
        for &p in &points[1..] {
            f.expand(id, &step(p));
            let (next, pos) = f.pop().unwrap();
            assert_eq!(pos, p);
            id = next;
        }
        id
    }

    #[test]
    fn joins_both_halves_in_order() {
        let start = Pos::new(0, 0, 0);
        let meet = Pos::new(2, 0, 0);
        let goal = Pos::new(2, 0, 1);
        let fwd_pts = [start, Pos::new(1, 0, 0), meet];
        let bwd_pts = [goal, Pos::new(3, 0, 1), Pos::new(3, 0, 0), meet];

        let mut fwd = Frontier::new(Direction::Forward, start, goal);
        let mut bwd = Frontier::new(Direction::Backward, goal, start);
        let f = grow(&mut fwd, &fwd_pts);
        let b = grow(&mut bwd, &bwd_pts);

        let route = reconstruct(&fwd, f, &bwd, b).unwrap();
        assert_eq!(
            route.path,
            vec![
                start,
                Pos::new(1, 0, 0),
                meet,
                Pos::new(3, 0, 0),
                Pos::new(3, 0, 1),
                goal,
            ]
        );
        assert_eq!(route.cost, 5.0);
        assert_eq!(route.steps(), 5);
        assert_eq!(route.transitions(), 1);
        assert_eq!(route.start(), Some(start));
        assert_eq!(route.goal(), Some(goal));
    }

    #[test]
    fn meeting_at_the_goal() {
        let start = Pos::new(0, 0, 0);
        let goal = Pos::new(1, 0, 0);
        let mut fwd = Frontier::new(Direction::Forward, start, goal);
        let bwd = Frontier::new(Direction::Backward, goal, start);
        let f = grow(&mut fwd, &[start, goal]);
        let b = bwd.best(goal).unwrap();
        let route = reconstruct(&fwd, f, &bwd, b).unwrap();
        assert_eq!(route.path, vec![start, goal]);
        assert_eq!(route.cost, 1.0);
    }

    #[test]
    fn mismatched_nodes_do_not_join() {
        let start = Pos::new(0, 0, 0);
        let goal = Pos::new(3, 0, 0);
        let mut fwd = Frontier::new(Direction::Forward, start, goal);
        let bwd = Frontier::new(Direction::Backward, goal, start);
        let f = grow(&mut fwd, &[start, Pos::new(1, 0, 0)]);
        let b = bwd.best(goal).unwrap();
        // Different positions.
        assert_eq!(reconstruct(&fwd, f, &bwd, b), None);
        // An id the backward frontier never created.
        assert_eq!(reconstruct(&fwd, f, &bwd, f), None);
    }

    #[test]
    fn stay_has_zero_cost() {
        let p = Pos::new(4, 4, 2);
        let route = Route::stay(p);
        assert_eq!(route.path, vec![p]);
        assert_eq!(route.cost, 0.0);
        assert_eq!(route.steps(), 0);
    }
}
