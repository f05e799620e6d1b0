//! Robot identities and their committed positions.

use std::collections::BTreeMap;

use ricochet_circuits_core::{BoardError, CellCoord, RobotId};

/// Arena of robot records addressed by [`RobotId`].
///
/// Robots are never destroyed, so identifiers index the arena directly.
#[derive(Clone, Debug, Default)]
pub struct RobotArena {
    labels: Vec<Option<String>>,
}

impl RobotArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new robot with an optional display label.
    pub fn spawn(&mut self, label: Option<&str>) -> RobotId {
        let id = RobotId::new(u32::try_from(self.labels.len()).unwrap_or(u32::MAX));
        self.labels.push(label.map(str::to_owned));
        id
    }

    /// Reports whether the arena issued the provided identifier.
    #[must_use]
    pub fn contains(&self, robot: RobotId) -> bool {
        self.index(robot).is_some()
    }

    /// Display label of the robot, if it has one.
    #[must_use]
    pub fn label(&self, robot: RobotId) -> Option<&str> {
        self.index(robot).and_then(|index| self.labels[index].as_deref())
    }

    /// Number of robots spawned so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Reports whether no robot has been spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn index(&self, robot: RobotId) -> Option<usize> {
        let index = usize::try_from(robot.get()).ok()?;
        (index < self.labels.len()).then_some(index)
    }
}

/// Mapping from robots to their committed cells, kept unique in both directions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RobotPositions {
    by_robot: BTreeMap<RobotId, CellCoord>,
    by_cell: BTreeMap<CellCoord, RobotId>,
}

impl RobotPositions {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a robot that does not yet hold a position.
    pub fn place(&mut self, robot: RobotId, cell: CellCoord) -> Result<(), BoardError> {
        self.check_placement(robot, cell)?;
        let _ = self.by_robot.insert(robot, cell);
        let _ = self.by_cell.insert(cell, robot);
        Ok(())
    }

    /// Verifies that [`RobotPositions::place`] would succeed without mutating.
    pub fn check_placement(&self, robot: RobotId, cell: CellCoord) -> Result<(), BoardError> {
        if self.by_robot.contains_key(&robot) {
            return Err(BoardError::DuplicatePlacement { robot });
        }
        if let Some(&occupant) = self.by_cell.get(&cell) {
            return Err(BoardError::PlacementConflict {
                robot,
                cell,
                occupant,
            });
        }
        Ok(())
    }

    /// Moves an already placed robot to a free cell.
    pub fn relocate(&mut self, robot: RobotId, to: CellCoord) -> Result<(), BoardError> {
        let from = self
            .position(robot)
            .ok_or(BoardError::UnknownRobotMove { robot })?;
        if let Some(occupant) = self.occupant(to).filter(|occupant| *occupant != robot) {
            return Err(BoardError::PlacementConflict {
                robot,
                cell: to,
                occupant,
            });
        }
        let _ = self.by_cell.remove(&from);
        let _ = self.by_cell.insert(to, robot);
        let _ = self.by_robot.insert(robot, to);
        Ok(())
    }

    /// Committed cell of the robot, if placed.
    #[must_use]
    pub fn position(&self, robot: RobotId) -> Option<CellCoord> {
        self.by_robot.get(&robot).copied()
    }

    /// Robot sitting on the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<RobotId> {
        self.by_cell.get(&cell).copied()
    }

    /// Reports whether some robot other than `moving` sits on `cell`.
    #[must_use]
    pub fn is_occupied(&self, cell: CellCoord, moving: RobotId) -> bool {
        self.occupant(cell)
            .is_some_and(|occupant| occupant != moving)
    }

    /// Reports whether the robot holds a position.
    #[must_use]
    pub fn contains(&self, robot: RobotId) -> bool {
        self.by_robot.contains_key(&robot)
    }

    /// Iterator over placed robots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (RobotId, CellCoord)> + '_ {
        self.by_robot.iter().map(|(robot, cell)| (*robot, *cell))
    }

    /// Number of placed robots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_robot.len()
    }

    /// Reports whether no robot is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_robot.is_empty()
    }
}
