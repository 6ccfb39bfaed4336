//! **levelnav-core** — multi-level grid model for building navigation.
//!
//! This crate provides the foundational types shared by the *levelnav*
//! crates: positions and extents, terrain tags, the read-only
//! [`GridModel`], and a text floor plan format.

pub mod floorplan;
pub mod geom;
pub mod grid;
pub mod terrain;

pub use floorplan::GridError;
pub use geom::{Extent, Pos};
pub use grid::GridModel;
pub use terrain::Terrain;
