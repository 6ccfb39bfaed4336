//! The [`GridModel`] type — a static levels × rows × columns terrain map.
//!
//! A grid is filled in once by an authoring step and then only ever handed
//! out by shared reference, so nothing can change it while a search holds a
//! borrow.

use crate::geom::{Extent, Pos};
use crate::terrain::Terrain;

/// A multi-level grid of [`Terrain`] tags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridModel {
    extent: Extent,
    cells: Vec<Terrain>,
}

impl GridModel {
    /// Create a new grid filled with [`Terrain::Empty`].
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            cells: vec![Terrain::Empty; extent.len()],
        }
    }

    /// Create a new grid of the given dimensions.
    pub fn with_size(width: i32, height: i32, levels: i32) -> Self {
        Self::new(Extent::new(width, height, levels))
    }

    /// Dimensions of the grid.
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Width of every level.
    #[inline]
    pub fn width(&self) -> i32 {
        self.extent.width
    }

    /// Height of every level.
    #[inline]
    pub fn height(&self) -> i32 {
        self.extent.height
    }

    /// Number of levels.
    #[inline]
    pub fn levels(&self) -> i32 {
        self.extent.levels
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.extent.contains(p)
    }

    /// Terrain at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn terrain(&self, p: Pos) -> Option<Terrain> {
        self.extent.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Pos) -> bool {
        self.terrain(p).is_some_and(Terrain::passable)
    }

    /// Set the terrain at `p`. No-op if `p` is outside the grid.
    pub fn set(&mut self, p: Pos, t: Terrain) {
        if let Some(i) = self.extent.index(p) {
            self.cells[i] = t;
        }
    }

    /// Set every cell of row `y` on `level` with `x` in `[x0, x1)`.
    /// Cells outside the grid are skipped.
    pub fn set_row(&mut self, level: i32, y: i32, x0: i32, x1: i32, t: Terrain) {
        for x in x0..x1 {
            self.set(Pos::new(x, y, level), t);
        }
    }

    /// Fill every cell with `t`.
    pub fn fill(&mut self, t: Terrain) {
        self.cells.fill(t);
    }

    /// Iterate over `(position, terrain)` pairs in level, row, column order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Terrain)> + '_ {
        self.extent.iter().zip(self.cells.iter().copied())
    }

    /// Count cells of the given terrain.
    pub fn count(&self, t: Terrain) -> usize {
        self.cells.iter().filter(|&&c| c == t).count()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = GridModel::with_size(3, 3, 2);
        g.set(Pos::new(1, 1, 0), Terrain::Escalator);
        g.set(Pos::new(1, 1, 1), Terrain::Escalator);
        let json = serde_json::to_string(&g).unwrap();
        let back: GridModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}
