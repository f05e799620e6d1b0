#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state for Ricochet Circuits.
//!
//! A [`Board`] owns the robot arena, the merged wall layout and the single
//! authoritative move history. Reusable circuit blocks are authored as
//! [`Component`] values and stamped onto a board, which translates their walls
//! and robots and takes over recording of every later move.

mod geometry;
mod robots;

pub use geometry::{GridGeometry, WallSet};
pub use robots::{RobotArena, RobotPositions};

use log::debug;
use ricochet_circuits_core::{BoardError, CellCoord, Direction, MoveCommand, Offset, RobotId};

/// Destination for commanded moves.
///
/// Circuit scripts are written against this trait so the same script records
/// into a standalone [`Component`] before stamping and into the owning
/// [`Board`] afterwards.
pub trait MoveLog {
    /// Appends a move to the history, validating that its robot is placed.
    fn record(&mut self, command: MoveCommand) -> Result<(), BoardError>;

    /// Convenience wrapper that records a move for `robot` in `direction`.
    fn move_robot(&mut self, robot: RobotId, direction: Direction) -> Result<(), BoardError> {
        self.record(MoveCommand::new(robot, direction))
    }
}

/// Self-contained wall and robot layout with its own local origin.
///
/// A component with `0 x 0` dimensions is a plain container whose robots are
/// not bounds-checked until it is stamped onto a board. Components are not
/// `Clone`: every stamp needs a freshly built component so that each robot is
/// claimed at exactly one position.
#[derive(Debug)]
pub struct Component {
    geometry: GridGeometry,
    robots: Vec<RobotId>,
    positions: RobotPositions,
    history: Vec<MoveCommand>,
}

impl Component {
    /// Creates an empty component with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            geometry: GridGeometry::new(columns, rows),
            robots: Vec::new(),
            positions: RobotPositions::new(),
            history: Vec::new(),
        }
    }

    /// Adds a horizontal wall in local coordinates.
    pub fn put_horizontal_wall(&mut self, cell: CellCoord) {
        self.geometry.put_horizontal_wall(cell);
    }

    /// Adds a vertical wall in local coordinates.
    pub fn put_vertical_wall(&mut self, cell: CellCoord) {
        self.geometry.put_vertical_wall(cell);
    }

    /// Adds batches of horizontal and vertical walls in local coordinates.
    pub fn put_walls(&mut self, horizontal: &[CellCoord], vertical: &[CellCoord]) {
        for cell in horizontal {
            self.put_horizontal_wall(*cell);
        }
        for cell in vertical {
            self.put_vertical_wall(*cell);
        }
    }

    /// Places a robot at a local cell.
    ///
    /// Components with a non-zero size reject cells outside their own
    /// bounds. A `0 x 0` component accepts any cell.
    pub fn put(&mut self, robot: RobotId, cell: CellCoord) -> Result<(), BoardError> {
        if !self.is_unbounded() && !self.geometry.in_bounds(cell) {
            return Err(BoardError::PlacementOutOfBounds { robot, cell });
        }
        self.positions.place(robot, cell)?;
        self.robots.push(robot);
        Ok(())
    }

    fn is_unbounded(&self) -> bool {
        self.geometry.columns() == 0 && self.geometry.rows() == 0
    }

    /// Dimensions and walls of the component.
    #[must_use]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Robots in placement order.
    #[must_use]
    pub fn robots(&self) -> &[RobotId] {
        &self.robots
    }

    /// Local robot positions.
    #[must_use]
    pub fn positions(&self) -> &RobotPositions {
        &self.positions
    }

    /// Moves recorded before the component was stamped.
    #[must_use]
    pub fn history(&self) -> &[MoveCommand] {
        &self.history
    }
}

impl MoveLog for Component {
    fn record(&mut self, command: MoveCommand) -> Result<(), BoardError> {
        if !self.positions.contains(command.robot) {
            return Err(BoardError::UnknownRobotMove {
                robot: command.robot,
            });
        }
        self.history.push(command);
        Ok(())
    }
}

/// Root component that owns the robot arena and the authoritative history.
#[derive(Debug)]
pub struct Board {
    layout: Component,
    arena: RobotArena,
}

impl Board {
    /// Creates an empty board with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            layout: Component::new(columns, rows),
            arena: RobotArena::new(),
        }
    }

    /// Creates a new robot owned by this board.
    pub fn spawn_robot(&mut self, label: Option<&str>) -> RobotId {
        self.arena.spawn(label)
    }

    /// Mutable access to the arena, used by components that spawn their own robots.
    pub fn robots_mut(&mut self) -> &mut RobotArena {
        &mut self.arena
    }

    /// Adds a horizontal wall.
    pub fn put_horizontal_wall(&mut self, cell: CellCoord) {
        self.layout.put_horizontal_wall(cell);
    }

    /// Adds a vertical wall.
    pub fn put_vertical_wall(&mut self, cell: CellCoord) {
        self.layout.put_vertical_wall(cell);
    }

    /// Adds batches of horizontal and vertical walls.
    pub fn put_walls(&mut self, horizontal: &[CellCoord], vertical: &[CellCoord]) {
        self.layout.put_walls(horizontal, vertical);
    }

    /// Places a robot spawned by this board at a cell within its bounds.
    pub fn put(&mut self, robot: RobotId, cell: CellCoord) -> Result<(), BoardError> {
        self.check_placement(robot, cell)?;
        self.layout.put(robot, cell)
    }

    /// Copies a component's walls and robots onto the board at `offset`.
    ///
    /// Walls are unioned with the existing layout. Every robot is validated
    /// before anything is mutated, so a rejected stamp leaves the board
    /// untouched. Moves the component recorded before stamping are appended
    /// to the board history; all later moves must go through the board.
    pub fn stamp(&mut self, component: Component, offset: Offset) -> Result<(), BoardError> {
        let Component {
            geometry,
            robots,
            positions,
            history,
        } = component;

        let mut placements = Vec::with_capacity(robots.len());
        for robot in robots {
            let local = positions
                .position(robot)
                .ok_or(BoardError::UnknownRobot { robot })?;
            let cell = local.translated(offset);
            self.check_placement(robot, cell)?;
            placements.push((robot, cell));
        }

        self.layout.geometry.merge_translated(&geometry, offset);
        for (robot, cell) in &placements {
            self.layout.put(*robot, *cell)?;
        }
        self.layout.history.extend(history.iter().copied());

        debug!(
            "stamped component at ({}, {}): {} robots, {} horizontal and {} vertical walls, {} pending moves",
            offset.dx(),
            offset.dy(),
            placements.len(),
            geometry.horizontal_walls().len(),
            geometry.vertical_walls().len(),
            history.len()
        );
        Ok(())
    }

    fn check_placement(&self, robot: RobotId, cell: CellCoord) -> Result<(), BoardError> {
        if !self.arena.contains(robot) {
            return Err(BoardError::UnknownRobot { robot });
        }
        if !self.layout.geometry.in_bounds(cell) {
            return Err(BoardError::PlacementOutOfBounds { robot, cell });
        }
        self.layout.positions.check_placement(robot, cell)
    }
}

impl MoveLog for Board {
    fn record(&mut self, command: MoveCommand) -> Result<(), BoardError> {
        self.layout.record(command)?;
        debug!(
            "recorded move #{}: {} {}",
            self.layout.history.len(),
            command.robot,
            command.direction
        );
        Ok(())
    }
}

/// Query functions that provide read-only access to the board state.
pub mod query {
    use super::{Board, GridGeometry, RobotArena, RobotPositions};
    use ricochet_circuits_core::{MoveCommand, RobotId};

    /// Dimensions and merged walls of the board.
    #[must_use]
    pub fn geometry(board: &Board) -> &GridGeometry {
        &board.layout.geometry
    }

    /// Initial committed robot positions, before any history is replayed.
    #[must_use]
    pub fn positions(board: &Board) -> &RobotPositions {
        &board.layout.positions
    }

    /// The authoritative move history in recording order.
    #[must_use]
    pub fn history(board: &Board) -> &[MoveCommand] {
        &board.layout.history
    }

    /// Robots placed on the board in placement order.
    #[must_use]
    pub fn robots(board: &Board) -> &[RobotId] {
        &board.layout.robots
    }

    /// Arena holding every robot spawned by the board.
    #[must_use]
    pub fn arena(board: &Board) -> &RobotArena {
        &board.arena
    }

    /// Display label of a robot, if it has one.
    #[must_use]
    pub fn label(board: &Board, robot: RobotId) -> Option<&str> {
        board.arena.label(robot)
    }
}
