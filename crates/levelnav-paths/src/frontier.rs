use std::collections::{BinaryHeap, HashMap, HashSet};

use levelnav_core::Pos;

use crate::distance::estimate;
use crate::neighbors::Edge;

/// Index of a node inside the arena of the frontier that created it.
pub type NodeId = usize;

/// Which end of the search a frontier grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// From the start, guided toward the goal.
    Forward,
    /// From the goal, guided toward the start.
    Backward,
}

/// A node of one frontier's search tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    pub pos: Pos,
    pub(crate) parent: Option<NodeId>,
    pub g: f32,
    pub h: f32,
}

impl SearchNode {
    /// Estimated total cost through this node.
    #[inline]
    pub fn f(&self) -> f32 {
        self.g + self.h
    }
}

// ---------------------------------------------------------------------------
// Queue entries
// ---------------------------------------------------------------------------

/// Heap entry, ordered so `BinaryHeap` pops the smallest `f` first and,
/// among equal `f`, the entry pushed first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct QueueEntry {
    pub(crate) f: f32,
    pub(crate) seq: u64,
    pub(crate) node: NodeId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for QueueEntry {}

// ---------------------------------------------------------------------------
// Frontier
// ---------------------------------------------------------------------------

/// One direction of a bidirectional search: open queue, best-known node per
/// position, and the set of finalized positions.
///
/// Nodes are appended to an arena and never mutated; a better route to a
/// position adds a new node and repoints the best-known map at it. The old
/// queue entry stays behind and is discarded when popped, since by then the
/// position is closed.
pub struct Frontier {
    direction: Direction,
    target: Pos,
    nodes: Vec<SearchNode>,
    best: HashMap<Pos, NodeId>,
    closed: HashSet<Pos>,
    open: BinaryHeap<QueueEntry>,
    seq: u64,
    expanded: u32,
}

impl Frontier {
    /// Create a frontier rooted at `root` and guided toward `target`.
    pub fn new(direction: Direction, root: Pos, target: Pos) -> Self {
        let mut frontier = Self {
            direction,
            target,
            nodes: Vec::new(),
            best: HashMap::new(),
            closed: HashSet::new(),
            open: BinaryHeap::new(),
            seq: 0,
            expanded: 0,
        };
        frontier.record(root, None, 0.0);
        frontier
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether no entries remain in the open queue.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.open.is_empty()
    }

    #[inline]
    pub fn is_closed(&self, p: Pos) -> bool {
        self.closed.contains(&p)
    }

    /// Number of positions this frontier has expanded.
    #[inline]
    pub fn expanded(&self) -> u32 {
        self.expanded
    }

    /// The node `id`, or `None` if this frontier never created it.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id)
    }

    /// The lowest-`g` node recorded for `p`, if any.
    pub fn best(&self, p: Pos) -> Option<NodeId> {
        self.best.get(&p).copied()
    }

    /// Pop the open entry with the smallest `f`, discarding entries whose
    /// position is already closed. Returns the node and its position.
    pub fn pop(&mut self) -> Option<(NodeId, Pos)> {
        while let Some(entry) = self.open.pop() {
            let pos = self.nodes[entry.node].pos;
            if !self.closed.contains(&pos) {
                return Some((entry.node, pos));
            }
        }
        None
    }

    /// Finalize `id`'s position and relax its outgoing `edges`.
    ///
    /// A neighbor is recorded and pushed when it has no node yet or when the
    /// new `g` is strictly lower than the recorded one. Ids this frontier
    /// never created are ignored.
    pub fn expand(&mut self, id: NodeId, edges: &[Edge]) {
        let Some(&current) = self.nodes.get(id) else {
            return;
        };
        self.closed.insert(current.pos);
        self.expanded += 1;

        for e in edges {
            if self.closed.contains(&e.to) {
                continue;
            }
            let g = current.g + e.cost;
            let improves = match self.best.get(&e.to) {
                Some(&known) => g < self.nodes[known].g,
                None => true,
            };
            if improves {
                self.record(e.to, Some(id), g);
            }
        }
    }

    /// Positions from `id` back to this frontier's root. Empty for an id
    /// this frontier never created.
    pub fn chain(&self, id: NodeId) -> Chain<'_> {
        Chain {
            nodes: &self.nodes,
            next: Some(id),
        }
    }

    fn record(&mut self, pos: Pos, parent: Option<NodeId>, g: f32) {
        let node = SearchNode {
            pos,
            parent,
            g,
            h: estimate(pos, self.target),
        };
        let id = self.nodes.len();
        self.nodes.push(node);
        self.best.insert(pos, id);
        self.open.push(QueueEntry {
            f: node.f(),
            seq: self.seq,
            node: id,
        });
        self.seq += 1;
    }
}

/// Iterator over a parent chain, see [`Frontier::chain`].
pub struct Chain<'a> {
    nodes: &'a [SearchNode],
    next: Option<NodeId>,
}

impl Iterator for Chain<'_> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.parent;
        Some(node.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(x: i32, y: i32, cost: f32) -> Edge {
        Edge {
            to: Pos::new(x, y, 0),
            cost,
        }
    }

    #[test]
    fn queue_pops_smallest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry { f: 3.0, seq: 0, node: 0 });
        heap.push(QueueEntry { f: 1.5, seq: 1, node: 1 });
        heap.push(QueueEntry { f: 1.5, seq: 2, node: 2 });
        heap.push(QueueEntry { f: 0.5, seq: 3, node: 3 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn root_is_recorded() {
        let root = Pos::new(0, 0, 0);
        let f = Frontier::new(Direction::Forward, root, Pos::new(3, 0, 0));
        let root_node = f.node(f.best(root).unwrap()).unwrap();
        assert_eq!(root_node.g, 0.0);
        assert_eq!(root_node.h, 3.0);
        assert!(!f.is_exhausted());
        assert!(!f.is_closed(root));
    }

    #[test]
    fn expand_closes_and_records() {
        let root = Pos::new(0, 0, 0);
        let mut f = Frontier::new(Direction::Forward, root, Pos::new(3, 0, 0));
        let (id, pos) = f.pop().unwrap();
        assert_eq!(pos, root);
        f.expand(id, &[edge(1, 0, 1.0), edge(0, 1, 1.0)]);
        assert!(f.is_closed(root));
        assert_eq!(f.expanded(), 1);
        let right = f.best(Pos::new(1, 0, 0)).unwrap();
        assert_eq!(f.node(right).unwrap().g, 1.0);
        assert_eq!(f.node(right).unwrap().f(), 3.0);
        // (1,0) lies on the way to the target, so it pops before (0,1).
        assert_eq!(f.pop(), Some((right, Pos::new(1, 0, 0))));
    }

    #[test]
    fn lower_g_replaces_and_stale_entry_is_discarded() {
        let root = Pos::new(0, 0, 0);
        let mut f = Frontier::new(Direction::Forward, root, Pos::new(9, 9, 0));
        let (r, _) = f.pop().unwrap();
        f.expand(r, &[edge(1, 0, 5.0), edge(0, 1, 1.0)]);
        let worse = f.best(Pos::new(1, 0, 0)).unwrap();

        let (below, pos) = f.pop().unwrap();
        assert_eq!(pos, Pos::new(0, 1, 0));
        f.expand(below, &[edge(1, 0, 1.0)]);
        let better = f.best(Pos::new(1, 0, 0)).unwrap();
        assert_ne!(worse, better);
        assert_eq!(f.node(better).unwrap().g, 2.0);

        // Equal g never replaces.
        f.expand(below, &[edge(1, 0, 1.0)]);
        assert_eq!(f.best(Pos::new(1, 0, 0)), Some(better));

        assert_eq!(f.pop(), Some((better, Pos::new(1, 0, 0))));
        f.expand(better, &[]);
        // Only the stale entry for (1,0) remains.
        assert_eq!(f.pop(), None);
        assert!(f.is_exhausted());
    }

    #[test]
    fn closed_neighbors_are_ignored() {
        let root = Pos::new(0, 0, 0);
        let mut f = Frontier::new(Direction::Backward, root, Pos::new(2, 0, 0));
        let (r, _) = f.pop().unwrap();
        f.expand(r, &[edge(1, 0, 1.0)]);
        let (n, _) = f.pop().unwrap();
        f.expand(n, &[edge(0, 0, 1.0)]);
        assert_eq!(f.best(root), Some(r));
        assert_eq!(f.direction(), Direction::Backward);
    }

    #[test]
    fn chain_walks_back_to_root() {
        let root = Pos::new(0, 0, 0);
        let mut f = Frontier::new(Direction::Forward, root, Pos::new(2, 0, 0));
        let (r, _) = f.pop().unwrap();
        f.expand(r, &[edge(1, 0, 1.0)]);
        let (a, _) = f.pop().unwrap();
        f.expand(a, &[edge(2, 0, 1.0)]);
        let b = f.best(Pos::new(2, 0, 0)).unwrap();
        let chain: Vec<_> = f.chain(b).collect();
        assert_eq!(
            chain,
            vec![Pos::new(2, 0, 0), Pos::new(1, 0, 0), Pos::new(0, 0, 0)]
        );
    }

    #[test]
    fn foreign_node_ids_are_rejected() {
        let mut big = Frontier::new(Direction::Forward, Pos::new(0, 0, 0), Pos::new(5, 0, 0));
        let (r, _) = big.pop().unwrap();
        big.expand(r, &[edge(1, 0, 1.0), edge(0, 1, 1.0)]);
        let foreign = big.best(Pos::new(0, 1, 0)).unwrap();

        let mut small = Frontier::new(Direction::Backward, Pos::new(5, 0, 0), Pos::new(0, 0, 0));
        assert!(small.node(foreign).is_none());
        assert_eq!(small.chain(foreign).count(), 0);
        small.expand(foreign, &[edge(4, 0, 1.0)]);
        assert_eq!(small.expanded(), 0);
        assert_eq!(small.best(Pos::new(4, 0, 0)), None);
    }
}
