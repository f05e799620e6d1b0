#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Logic circuits built from sliding robots and walls.
//!
//! A robot standing on an input cell represents a logical one. Pushing robots
//! in a fixed order lets them block or release each other, so the robots
//! labelled `S` and `C` end up in the output slots that encode the sum and
//! carry bits.

mod half_adder;

pub use half_adder::HalfAdder;

use std::fmt;

use log::debug;
use ricochet_circuits_core::{BoardError, CellCoord, Direction, Offset, RobotId};
use ricochet_circuits_wall_layout::{decode, LayoutError};
use ricochet_circuits_world::{Board, MoveLog};
use thiserror::Error;

const HALF_ADDER_BOARD: &str = r"
    . . . . . . . . . .
    . . . . . . . . . .
    . . . . . . . . . .
    . . ._. . . . . . .
    . . ._. . . . . . .
    . . . . . . . . . .
    . . ._. . . . . . .
    . . ._. . . . . . .
    . . . . . . ._. . .
    . . . . . . ._. | .
    . . . . . . ._. | .
    . . . . . . . . . .
";

const FULL_ADDER_BOARD: &str = r"
    . . . . . . . . . . . . . . .
    . . . . . . . . . . . . . . .
    . . . . . . . . . . . . . . .
    . . ._. . . . . . . . . . . .
    . . ._. . . . . . . ._. . . .
    . . . . . . ._._._._| | . . .
    . . ._. . . . . . . . | . . .
    . . ._. . . . . . . . | . . .
    . . . . . . . . . . . | . . .
    . . . . . . . . . . . | . . .
    . . . . . . ._. . . . | . . .
    . . . . . . ._. . . . | . . .
    . . . . . . ._. . . . | . . .
    . . . . . . . . . . . |_. . .
    . . . . . . . . . . . ._. | .
    . . . . . . . . . . . |_. . .
    . . . . . . . . . |_._._. | .
    . . . . . . . . . . . . . . .
";

/// Errors raised while assembling a circuit board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CircuitError {
    /// A wall diagram failed to decode.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// Robots could not be placed or moved.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Reference circuits that can be built and rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Circuit {
    /// Inputs `A` and `B` feeding one half adder.
    HalfAdder,
    /// Inputs `A`, `B` and carry-in `X` feeding two chained half adders.
    FullAdder,
}

impl Circuit {
    /// Every available circuit.
    pub const ALL: [Circuit; 2] = [Circuit::HalfAdder, Circuit::FullAdder];

    /// Builds the board with its complete move script.
    pub fn build(self) -> Result<Board, CircuitError> {
        match self {
            Self::HalfAdder => half_adder(),
            Self::FullAdder => full_adder(),
        }
    }

    /// File-system friendly name of the circuit.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HalfAdder => "half_adder",
            Self::FullAdder => "full_adder",
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn board_from_diagram(diagram: &str) -> Result<Board, CircuitError> {
    let layout = decode(diagram)?;
    let mut board = Board::new(layout.columns(), layout.rows());
    board.put_walls(layout.horizontal_walls(), layout.vertical_walls());
    Ok(board)
}

fn place(board: &mut Board, label: Option<&str>, x: i32, y: i32) -> Result<RobotId, BoardError> {
    let robot = board.spawn_robot(label);
    board.put(robot, CellCoord::new(x, y))?;
    Ok(robot)
}

/// Builds the 9 x 11 half adder board with both inputs set.
pub fn half_adder() -> Result<Board, CircuitError> {
    let mut board = board_from_diagram(HALF_ADDER_BOARD)?;

    let a = place(&mut board, Some("A"), 1, 3)?;
    let b = place(&mut board, Some("B"), 1, 6)?;

    let (adder, component) = HalfAdder::new(board.robots_mut())?;
    board.stamp(component, Offset::new(3, 1))?;

    board.move_robot(a, Direction::Right)?;
    board.move_robot(b, Direction::Right)?;
    adder.execute(&mut board)?;

    debug!("built half adder circuit");
    Ok(board)
}

/// Builds the 14 x 17 full adder board with all three inputs set.
pub fn full_adder() -> Result<Board, CircuitError> {
    let mut board = board_from_diagram(FULL_ADDER_BOARD)?;

    let a = place(&mut board, Some("A"), 1, 3)?;
    let b = place(&mut board, Some("B"), 1, 6)?;
    let x = place(&mut board, Some("X"), 5, 11)?;
    let bridge = place(&mut board, None, 10, 4)?;
    let carry = place(&mut board, Some("C"), 9, 15)?;

    let (first, component) = HalfAdder::new(board.robots_mut())?;
    board.stamp(component, Offset::new(3, 1))?;

    let (second, component) = HalfAdder::new(board.robots_mut())?;
    board.stamp(component, Offset::new(7, 6))?;

    board.move_robot(a, Direction::Right)?;
    board.move_robot(b, Direction::Right)?;
    board.move_robot(x, Direction::Right)?;
    first.execute(&mut board)?;
    board.move_robot(first.carry(), Direction::Up)?;
    board.move_robot(first.carry(), Direction::Right)?;
    second.execute(&mut board)?;
    board.move_robot(bridge, Direction::Down)?;
    board.move_robot(carry, Direction::Right)?;

    debug!("built full adder circuit");
    Ok(board)
}
