//! Text floor plans.
//!
//! A floor plan lists one block of lines per level, ground level first,
//! with blocks separated by a blank line. Every line of every block must
//! have the same width and every block the same height:
//!
//! ```text
//! ..#..
//! L.D.E
//!
//! .....
//! L...E
//! ```
//!
//! Runes are those of [`Terrain::rune`].

use std::fmt;

use crate::geom::{Extent, Pos};
use crate::grid::GridModel;
use crate::terrain::Terrain;

/// Errors that can occur when parsing a floor plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The plan holds no cells.
    Empty,
    /// Lines or levels have inconsistent sizes.
    InconsistentSize {
        level: i32,
        expected: (i32, i32),
        found: (i32, i32),
    },
    /// A character that is not a terrain rune was found.
    InvalidRune { ch: char, pos: Pos },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "floor plan: no cells"),
            Self::InconsistentSize {
                level,
                expected,
                found,
            } => write!(
                f,
                "floor plan: level {level} is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "floor plan contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

impl GridModel {
    /// Parse a floor plan. See the [module docs](self) for the format.
    pub fn from_text(s: &str) -> Result<Self, GridError> {
        let blocks = split_levels(s);
        let Some(first) = blocks.first() else {
            return Err(GridError::Empty);
        };
        let width = first.first().map_or(0, |l| l.chars().count() as i32);
        let height = first.len() as i32;
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut grid = GridModel::new(Extent::new(width, height, blocks.len() as i32));
        for (level, lines) in blocks.iter().enumerate() {
            let level = level as i32;
            let found_h = lines.len() as i32;
            for (y, line) in lines.iter().enumerate() {
                let found_w = line.chars().count() as i32;
                if found_w != width || found_h != height {
                    return Err(GridError::InconsistentSize {
                        level,
                        expected: (width, height),
                        found: (found_w, found_h),
                    });
                }
                for (x, ch) in line.chars().enumerate() {
                    let pos = Pos::new(x as i32, y as i32, level);
                    let t = Terrain::from_rune(ch).ok_or(GridError::InvalidRune { ch, pos })?;
                    grid.set(pos, t);
                }
            }
        }
        Ok(grid)
    }

    /// Render the grid back into floor plan text.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.extent().len() + 2 * self.height() as usize);
        for level in 0..self.levels() {
            if level > 0 {
                out.push_str("\n\n");
            }
            for y in 0..self.height() {
                if y > 0 {
                    out.push('\n');
                }
                for x in 0..self.width() {
                    let t = self.terrain(Pos::new(x, y, level)).unwrap_or_default();
                    out.push(t.rune());
                }
            }
        }
        out
    }
}

/// Split trimmed text into per-level line blocks. Trailing whitespace on
/// each line is ignored; runs of blank lines count as one separator.
fn split_levels(s: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in s.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}
