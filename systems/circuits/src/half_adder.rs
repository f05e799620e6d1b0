use ricochet_circuits_core::{BoardError, CellCoord, Direction, RobotId};
use ricochet_circuits_wall_layout::decode;
use ricochet_circuits_world::{Component, MoveLog, RobotArena};

use crate::CircuitError;

const WALLS: &str = r"
    . ._. .
    ._| |_.
    | . | |
    . | | |
    |_. . |
    | . | |
    . | | |
    |_. . |
    |_._. .
    . . |_.
";

/// Reusable half adder block.
///
/// Input robots arrive from the left next to local rows 2 and 5. After the
/// script runs, the robot labelled `C` reports the carry bit and the robot
/// labelled `S` reports the sum bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalfAdder {
    upper_relay: RobotId,
    lower_relay: RobotId,
    feeder: RobotId,
    carry: RobotId,
    carry_guard: RobotId,
    sum: RobotId,
}

impl HalfAdder {
    /// Spawns the block's robots in `arena` and returns the unstamped component.
    ///
    /// The component is a `0 x 0` container; its walls and robots only gain
    /// board coordinates once it is stamped.
    pub fn new(arena: &mut RobotArena) -> Result<(Self, Component), CircuitError> {
        let layout = decode(WALLS)?;
        let mut component = Component::new(0, 0);
        component.put_walls(layout.horizontal_walls(), layout.vertical_walls());

        let mut place = |label: Option<&str>, x: i32, y: i32| -> Result<RobotId, BoardError> {
            let robot = arena.spawn(label);
            component.put(robot, CellCoord::new(x, y))?;
            Ok(robot)
        };

        let upper_relay = place(None, 0, 1)?;
        let lower_relay = place(None, 0, 4)?;
        let feeder = place(None, 1, 0)?;
        let carry = place(Some("C"), 2, 2)?;
        let carry_guard = place(None, 2, 1)?;
        let sum = place(Some("S"), 0, 7)?;

        let adder = Self {
            upper_relay,
            lower_relay,
            feeder,
            carry,
            carry_guard,
            sum,
        };
        Ok((adder, component))
    }

    /// Robot that reports the carry bit.
    #[must_use]
    pub const fn carry(&self) -> RobotId {
        self.carry
    }

    /// Robot that reports the sum bit.
    #[must_use]
    pub const fn sum(&self) -> RobotId {
        self.sum
    }

    /// Records the block's evaluation script into `log`.
    pub fn execute(&self, log: &mut impl MoveLog) -> Result<(), BoardError> {
        let script = [
            (self.upper_relay, Direction::Down),
            (self.upper_relay, Direction::Right),
            (self.lower_relay, Direction::Down),
            (self.lower_relay, Direction::Right),
            (self.feeder, Direction::Down),
            (self.carry, Direction::Down),
            (self.carry_guard, Direction::Down),
            (self.sum, Direction::Right),
            (self.carry, Direction::Right),
        ];
        for (robot, direction) in script {
            log.move_robot(robot, direction)?;
        }
        Ok(())
    }
}
