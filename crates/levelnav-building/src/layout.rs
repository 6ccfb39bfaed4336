//! Building authoring: floors of rooms with doors, one lift shaft and one
//! escalator stack.
//!
//! Every floor has the same layout. A row of room walls runs along `y = 2`,
//! split into `rooms_per_floor` equal slots; each room gets a door two
//! cells into its slot with a wall directly behind it. The lift sits near
//! the left edge and the escalator near the right edge, both at mid-height.

use levelnav_core::{Extent, GridError, GridModel, Pos, Terrain};

use crate::labels::{LabelError, LabelMap};

/// Row holding the room walls and doors.
const DOOR_ROW: i32 = 2;
/// Width of the wall segment drawn for each room.
const ROOM_WALL_LEN: i32 = 5;

/// Parameters of a generated building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildingConfig {
    pub width: i32,
    pub height: i32,
    pub floors: i32,
    pub rooms_per_floor: i32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 12,
            floors: 3,
            rooms_per_floor: 4,
        }
    }
}

impl BuildingConfig {
    /// Column of the lift shaft.
    pub fn lift_column(&self) -> (i32, i32) {
        (1, self.height / 2)
    }

    /// Column of the escalator stack.
    pub fn escalator_column(&self) -> (i32, i32) {
        (self.width - 2, self.height / 2)
    }

    /// Door position of `room` (0-based) on `floor` (0-based).
    pub fn door(&self, floor: i32, room: i32) -> Pos {
        Pos::new(self.room_x(room) + 2, DOOR_ROW, floor)
    }

    fn room_x(&self, room: i32) -> i32 {
        let slot = if self.rooms_per_floor > 0 {
            self.width / self.rooms_per_floor
        } else {
            0
        };
        room * slot
    }
}

/// Error building or loading a [`Building`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildingError {
    Grid(GridError),
    Label(LabelError),
}

impl std::fmt::Display for BuildingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "{e}"),
            Self::Label(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for BuildingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Label(e) => Some(e),
        }
    }
}

impl From<GridError> for BuildingError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<LabelError> for BuildingError {
    fn from(e: LabelError) -> Self {
        Self::Label(e)
    }
}

/// A grid together with the labels offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    pub grid: GridModel,
    pub labels: LabelMap,
}

impl Building {
    /// Generate a building from `config`.
    ///
    /// Labels are `Ex-FF-RR` for doors, then `liftFF` and `escFF` for the
    /// transition cells, floors and rooms numbered from 1.
    pub fn generate(config: &BuildingConfig) -> Result<Self, BuildingError> {
        let mut grid = GridModel::new(Extent::new(config.width, config.height, config.floors));
        let (lift_x, lift_y) = config.lift_column();
        let (esc_x, esc_y) = config.escalator_column();

        for z in 0..config.floors {
            for room in 0..config.rooms_per_floor {
                let rx = config.room_x(room);
                let door = config.door(z, room);
                grid.set_row(z, DOOR_ROW, rx, rx + ROOM_WALL_LEN, Terrain::Wall);
                grid.set(door, Terrain::Door);
                grid.set(door.shift(0, -1), Terrain::Wall);
            }
            grid.set(Pos::new(lift_x, lift_y, z), Terrain::Lift);
            grid.set(Pos::new(esc_x, esc_y, z), Terrain::Escalator);
        }

        let labels = generated_labels(config)?;
        log::debug!(
            "generated building {}: {} labels",
            grid.extent(),
            labels.len()
        );
        Ok(Self { grid, labels })
    }

    /// Load a building from a text floor plan, labelling every door, lift
    /// and escalator cell in scan order.
    ///
    /// Doors are named `Ex-FF-NN`. The first lift of a floor is `liftFF`,
    /// later ones `liftFF-N`; escalators likewise with `esc`.
    pub fn from_text(plan: &str) -> Result<Self, BuildingError> {
        let grid = GridModel::from_text(plan)?;
        let mut doors = LabelMap::new();
        let mut lifts = LabelMap::new();
        let mut escalators = LabelMap::new();
        let mut counts = vec![[0u32; 3]; grid.levels().max(0) as usize];

        for (p, t) in grid.iter() {
            let floor = p.level + 1;
            let n = &mut counts[p.level as usize];
            match t {
                Terrain::Door => {
                    n[0] += 1;
                    doors.insert(format!("Ex-{floor:02}-{:02}", n[0]), p)?;
                }
                Terrain::Lift => {
                    n[1] += 1;
                    lifts.insert(numbered("lift", floor, n[1]), p)?;
                }
                Terrain::Escalator => {
                    n[2] += 1;
                    escalators.insert(numbered("esc", floor, n[2]), p)?;
                }
                _ => {}
            }
        }

        let mut labels = doors;
        for (l, p) in lifts.iter().chain(escalators.iter()) {
            labels.insert(l, p)?;
        }
        Ok(Self { grid, labels })
    }
}

fn generated_labels(config: &BuildingConfig) -> Result<LabelMap, LabelError> {
    let (lift_x, lift_y) = config.lift_column();
    let (esc_x, esc_y) = config.escalator_column();
    let mut labels = LabelMap::new();
    for z in 0..config.floors {
        for room in 0..config.rooms_per_floor {
            labels.insert(door_label(z, room), config.door(z, room))?;
        }
    }
    for z in 0..config.floors {
        labels.insert(format!("lift{:02}", z + 1), Pos::new(lift_x, lift_y, z))?;
    }
    for z in 0..config.floors {
        labels.insert(format!("esc{:02}", z + 1), Pos::new(esc_x, esc_y, z))?;
    }
    Ok(labels)
}

fn door_label(floor: i32, room: i32) -> String {
    format!("Ex-{:02}-{:02}", floor + 1, room + 1)
}

fn numbered(prefix: &str, floor: i32, n: u32) -> String {
    if n == 1 {
        format!("{prefix}{floor:02}")
    } else {
        format!("{prefix}{floor:02}-{n}")
    }
}
