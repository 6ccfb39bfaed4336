//! Geometry primitives: [`Pos`] and [`Extent`].
//!
//! A position addresses one cell of a multi-level grid: `x` grows right,
//! `y` grows down, `level` grows upward through the building.

use std::fmt;
use std::ops::Add;

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A cell position `(x, y, level)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: i32,
    pub y: i32,
    pub level: i32,
}

impl Pos {
    /// Origin of the ground level.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        level: 0,
    };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32, level: i32) -> Self {
        Self { x, y, level }
    }

    /// Return a position shifted by (dx, dy) on the same level.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            level: self.level,
        }
    }

    /// The same column on another level.
    #[inline]
    pub const fn on_level(self, level: i32) -> Self {
        Self {
            x: self.x,
            y: self.y,
            level,
        }
    }

    /// The four planar neighbours, in search order: down, right, up, left.
    #[inline]
    pub fn neighbors_4(self) -> [Pos; 4] {
        [
            self.shift(0, 1),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(-1, 0),
        ]
    }

    /// Whether `other` shares this position's column (same x and y).
    #[inline]
    pub fn same_column(self, other: Pos) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.level
            .cmp(&other.level)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.level)
    }
}

impl From<(i32, i32, i32)> for Pos {
    fn from((x, y, level): (i32, i32, i32)) -> Self {
        Self::new(x, y, level)
    }
}

impl Add for Pos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.level + rhs.level)
    }
}

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// Dimensions of a multi-level grid. Valid positions satisfy
/// `0 <= x < width`, `0 <= y < height` and `0 <= level < levels`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub width: i32,
    pub height: i32,
    pub levels: i32,
}

impl Extent {
    /// Create a new extent. Negative dimensions are clamped to zero.
    pub const fn new(width: i32, height: i32, levels: i32) -> Self {
        Self {
            width: if width > 0 { width } else { 0 },
            height: if height > 0 { height } else { 0 },
            levels: if levels > 0 { levels } else { 0 },
        }
    }

    /// Whether `p` lies inside the extent.
    #[inline]
    pub fn contains(self, p: Pos) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.level >= 0
            && p.x < self.width
            && p.y < self.height
            && p.level < self.levels
    }

    /// Number of cells on a single level.
    #[inline]
    pub fn level_len(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.level_len() * self.levels as usize
    }

    /// Whether the extent holds no cells at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Flat index of `p` in level-major, then row-major order.
    #[inline]
    pub fn index(self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(
            p.level as usize * self.level_len()
                + p.y as usize * self.width as usize
                + p.x as usize,
        )
    }

    /// Inverse of [`index`](Self::index). `None` when `idx` is past the
    /// last cell, which covers every index of an empty extent.
    #[inline]
    pub fn pos(self, idx: usize) -> Option<Pos> {
        if idx >= self.len() {
            return None;
        }
        let level_len = self.level_len();
        let rest = idx % level_len;
        Some(Pos::new(
            (rest % self.width as usize) as i32,
            (rest / self.width as usize) as i32,
            (idx / level_len) as i32,
        ))
    }

    /// Iterate over all positions in index order.
    pub fn iter(self) -> impl Iterator<Item = Pos> {
        (0..self.len()).filter_map(move |i| self.pos(i))
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_follow_search_order() {
        let p = Pos::new(3, 3, 1);
        assert_eq!(
            p.neighbors_4(),
            [
                Pos::new(3, 4, 1),
                Pos::new(4, 3, 1),
                Pos::new(3, 2, 1),
                Pos::new(2, 3, 1),
            ]
        );
    }

    #[test]
    fn extent_contains() {
        let e = Extent::new(4, 3, 2);
        assert!(e.contains(Pos::new(0, 0, 0)));
        assert!(e.contains(Pos::new(3, 2, 1)));
        assert!(!e.contains(Pos::new(4, 0, 0)));
        assert!(!e.contains(Pos::new(0, 3, 0)));
        assert!(!e.contains(Pos::new(0, 0, 2)));
        assert!(!e.contains(Pos::new(-1, 0, 0)));
    }

    #[test]
    fn index_round_trip() {
        let e = Extent::new(5, 4, 3);
        for (i, p) in e.iter().enumerate() {
            assert_eq!(e.index(p), Some(i));
            assert_eq!(e.pos(i), Some(p));
        }
        assert_eq!(e.len(), 60);
        assert_eq!(e.index(Pos::new(5, 0, 0)), None);
        assert_eq!(e.pos(60), None);
    }

    #[test]
    fn negative_extent_is_empty() {
        let e = Extent::new(-2, 3, 1);
        assert!(e.is_empty());
        assert_eq!(e.iter().count(), 0);
        assert_eq!(e.pos(0), None);
    }

    #[test]
    fn zero_area_levels_have_no_positions() {
        for e in [Extent::new(0, 3, 2), Extent::new(4, 0, 2), Extent::new(4, 3, 0)] {
            assert!(e.is_empty(), "{e}");
            assert_eq!(e.pos(0), None);
            assert_eq!(e.pos(7), None);
        }
    }

    #[test]
    fn ordering_is_level_major() {
        let mut v = vec![Pos::new(0, 0, 1), Pos::new(5, 0, 0), Pos::new(0, 1, 0)];
        v.sort();
        assert_eq!(
            v,
            vec![Pos::new(5, 0, 0), Pos::new(0, 1, 0), Pos::new(0, 0, 1)]
        );
    }

    #[test]
    fn display() {
        assert_eq!(Pos::new(1, 5, 2).to_string(), "(1, 5, 2)");
        assert_eq!(Extent::new(20, 12, 3).to_string(), "20x12x3");
    }
}
