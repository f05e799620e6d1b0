#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ricochet Circuits engine.
//!
//! This crate defines the vocabulary that connects the authoritative board,
//! the pure movement and animation systems, and the rendering adapters.
//! Callers record [`MoveCommand`] values against a board, the movement system
//! resolves each command into committed cells, and the animation system turns
//! the resulting motion into [`RobotPose`] snapshots for adapters to draw.

use std::fmt;

use thiserror::Error;

/// Cardinal movement directions available to robots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit delta applied to a cell when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction pointing the other way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether the direction moves along the row axis.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed: wall entries may legally sit outside the board,
/// where they are inert. Committed robot cells always lie within bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Neighbouring cell one step away in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Cell shifted by the provided stamp offset.
    #[must_use]
    pub const fn translated(self, offset: Offset) -> Self {
        Self::new(
            self.x.saturating_add(offset.dx()),
            self.y.saturating_add(offset.dy()),
        )
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Translation applied when a component is stamped onto a board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    dx: i32,
    dy: i32,
}

impl Offset {
    /// Offset that leaves coordinates unchanged.
    pub const ZERO: Offset = Offset::new(0, 0);

    /// Creates a new offset from column and row deltas.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Column delta.
    #[must_use]
    pub const fn dx(&self) -> i32 {
        self.dx
    }

    /// Row delta.
    #[must_use]
    pub const fn dy(&self) -> i32 {
        self.dy
    }
}

/// Unique identifier assigned to a robot by the board's robot arena.
///
/// Robots are compared by identity only. Two robots sharing a label remain
/// distinct because they hold distinct identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotId(u32);

impl RobotId {
    /// Creates a new robot identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "robot#{}", self.0)
    }
}

/// A single commanded move recorded in a board's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveCommand {
    /// Robot that should slide.
    pub robot: RobotId,
    /// Direction the robot is pushed in.
    pub direction: Direction,
}

impl MoveCommand {
    /// Creates a new move command.
    #[must_use]
    pub const fn new(robot: RobotId, direction: Direction) -> Self {
        Self { robot, direction }
    }
}

/// Motion state of a robot captured in an animation snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    /// The robot rests on its committed cell.
    AtRest,
    /// The robot is drawn halfway between its committed cell and the next
    /// cell in the given direction. Never a legal resting state.
    HalfStep(Direction),
}

/// Committed cell plus motion state of a robot within one snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RobotPose {
    /// Last committed cell occupied by the robot.
    pub cell: CellCoord,
    /// Interpolation applied on top of the committed cell.
    pub motion: Motion,
}

impl RobotPose {
    /// Pose of a robot resting on the provided cell.
    #[must_use]
    pub const fn at_rest(cell: CellCoord) -> Self {
        Self {
            cell,
            motion: Motion::AtRest,
        }
    }

    /// Pose of a robot halfway out of `cell` toward `direction`.
    #[must_use]
    pub const fn half_step(cell: CellCoord, direction: Direction) -> Self {
        Self {
            cell,
            motion: Motion::HalfStep(direction),
        }
    }

    /// Reports whether the pose is a committed resting state.
    #[must_use]
    pub const fn is_at_rest(&self) -> bool {
        matches!(self.motion, Motion::AtRest)
    }

    /// Position expressed in cell units, including any half-step offset.
    #[must_use]
    pub fn render_position(&self) -> (f32, f32) {
        let x = self.cell.x() as f32;
        let y = self.cell.y() as f32;
        match self.motion {
            Motion::AtRest => (x, y),
            Motion::HalfStep(direction) => {
                let (dx, dy) = direction.delta();
                (x + dx as f32 * 0.5, y + dy as f32 * 0.5)
            }
        }
    }
}

/// Errors raised while assembling boards or interpreting their history.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// A robot was placed on a cell another robot already occupies.
    #[error("{robot} cannot be placed at {cell}: occupied by {occupant}")]
    PlacementConflict {
        /// Robot being placed.
        robot: RobotId,
        /// Requested cell.
        cell: CellCoord,
        /// Robot already sitting at the requested cell.
        occupant: RobotId,
    },
    /// A robot was placed while it already holds a position.
    #[error("{robot} is already placed")]
    DuplicatePlacement {
        /// Robot claimed twice.
        robot: RobotId,
    },
    /// A robot was placed outside the owning board's bounds.
    #[error("{robot} cannot be placed at {cell}: outside the board")]
    PlacementOutOfBounds {
        /// Robot being placed.
        robot: RobotId,
        /// Requested cell.
        cell: CellCoord,
    },
    /// A move referenced a robot that is not placed on the board.
    #[error("cannot move {robot}: not placed on the board")]
    UnknownRobotMove {
        /// Robot referenced by the move.
        robot: RobotId,
    },
    /// A robot identifier was not issued by the board's robot arena.
    #[error("{robot} was not spawned by this board")]
    UnknownRobot {
        /// Unrecognised identifier.
        robot: RobotId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_deltas_are_unit_vectors() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(dx.abs() + dy.abs(), 1, "{direction} is not a unit step");
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn step_follows_screen_coordinates() {
        let origin = CellCoord::new(2, 2);
        assert_eq!(origin.step(Direction::Up), CellCoord::new(2, 1));
        assert_eq!(origin.step(Direction::Down), CellCoord::new(2, 3));
        assert_eq!(origin.step(Direction::Left), CellCoord::new(1, 2));
        assert_eq!(origin.step(Direction::Right), CellCoord::new(3, 2));
    }

    #[test]
    fn translated_applies_offset_without_touching_original() {
        let local = CellCoord::new(1, 1);
        let stamped = local.translated(Offset::new(5, 5));
        assert_eq!(stamped, CellCoord::new(6, 6));
        assert_eq!(local, CellCoord::new(1, 1));
    }

    #[test]
    fn half_step_render_position_is_between_cells() {
        let pose = RobotPose::half_step(CellCoord::new(3, 4), Direction::Left);
        assert_eq!(pose.render_position(), (2.5, 4.0));
        assert!(!pose.is_at_rest());

        let pose = RobotPose::half_step(CellCoord::new(3, 4), Direction::Up);
        assert_eq!(pose.render_position(), (3.0, 3.5));
    }

    #[test]
    fn resting_pose_renders_on_cell() {
        let pose = RobotPose::at_rest(CellCoord::new(7, 1));
        assert_eq!(pose.render_position(), (7.0, 1.0));
        assert!(pose.is_at_rest());
    }

    #[test]
    fn board_errors_describe_the_robot() {
        let error = BoardError::UnknownRobotMove {
            robot: RobotId::new(3),
        };
        assert_eq!(
            error.to_string(),
            "cannot move robot#3: not placed on the board"
        );
    }
}
