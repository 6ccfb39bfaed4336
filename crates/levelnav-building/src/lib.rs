//! **levelnav-building** — buildings, labels and route sessions on top of
//! [`levelnav_paths`].
//!
//! A [`Building`] is a grid plus a [`LabelMap`] naming its doors, lifts and
//! escalators. Buildings are generated from a [`BuildingConfig`] or loaded
//! from a text floor plan. A [`RoutePlanner`] keeps the user's start and
//! goal selection and caches the route between them; [`render_session`]
//! draws the result as text.
//!
//! ```
//! use levelnav_building::{Building, BuildingConfig, RoutePlanner, RouteOutcome};
//!
//! let building = Building::generate(&BuildingConfig::default()).unwrap();
//! let mut planner = RoutePlanner::new(building);
//! planner.select_start("Ex-01-01").unwrap();
//! planner.select_goal("Ex-03-04").unwrap();
//! let route = planner.route().and_then(RouteOutcome::route).unwrap();
//! assert!(route.transitions() > 0);
//! ```

mod labels;
mod layout;
mod planner;
mod render;

pub use labels::{LabelError, LabelMap};
pub use layout::{Building, BuildingConfig, BuildingError};
pub use planner::{RouteOutcome, RoutePlanner};
pub use render::{Floors, PATH_RUNE, Session, render_floors, render_session};
