//! Terrain tags carried by every grid cell.

use std::fmt;

/// The kind of terrain at a grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Empty,
    Wall,
    Door,
    /// Vertical transition connecting every level that shares the column.
    Lift,
    /// Vertical transition leading to the level directly above.
    Escalator,
}

impl Terrain {
    /// All terrain kinds, in rune-table order.
    pub const ALL: [Terrain; 5] = [
        Terrain::Empty,
        Terrain::Wall,
        Terrain::Door,
        Terrain::Lift,
        Terrain::Escalator,
    ];

    /// Whether a walker may stand on this terrain.
    #[inline]
    pub fn passable(self) -> bool {
        !matches!(self, Terrain::Wall)
    }

    /// Whether this terrain is a vertical transition point.
    #[inline]
    pub fn is_transition(self) -> bool {
        matches!(self, Terrain::Lift | Terrain::Escalator)
    }

    /// Character representation used by text floor plans.
    pub fn rune(self) -> char {
        match self {
            Terrain::Empty => '.',
            Terrain::Wall => '#',
            Terrain::Door => 'D',
            Terrain::Lift => 'L',
            Terrain::Escalator => 'E',
        }
    }

    /// Parse a floor plan rune.
    pub fn from_rune(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.rune() == ch)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Terrain::Empty => "empty",
            Terrain::Wall => "wall",
            Terrain::Door => "door",
            Terrain::Lift => "lift",
            Terrain::Escalator => "escalator",
        };
        f.write_str(name)
    }
}
