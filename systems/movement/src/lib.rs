#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that resolves commanded moves into slides.
//!
//! A commanded robot slides one cell at a time until the next cell is out of
//! bounds, a wall separates it from the next cell, or another robot occupies
//! the next cell. Being unable to move at all is a normal outcome.

use std::slice;

use log::trace;
use ricochet_circuits_core::{BoardError, CellCoord, Direction, MoveCommand, RobotId};
use ricochet_circuits_world::{query, Board, GridGeometry, RobotPositions};

/// Result of resolving one commanded move.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slide {
    robot: RobotId,
    direction: Direction,
    origin: CellCoord,
    cells: Vec<CellCoord>,
}

impl Slide {
    /// Robot that was commanded.
    #[must_use]
    pub const fn robot(&self) -> RobotId {
        self.robot
    }

    /// Direction the robot was pushed in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Committed cell the robot started from.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Committed cells visited in order, excluding the origin.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Cell the robot rests on after the slide.
    #[must_use]
    pub fn destination(&self) -> CellCoord {
        self.cells.last().copied().unwrap_or(self.origin)
    }

    /// Reports whether the robot could not leave its origin.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Resolves a single commanded move without mutating any state.
///
/// Fails only when the robot holds no position.
pub fn resolve_slide(
    geometry: &GridGeometry,
    positions: &RobotPositions,
    robot: RobotId,
    direction: Direction,
) -> Result<Slide, BoardError> {
    let origin = positions
        .position(robot)
        .ok_or(BoardError::UnknownRobotMove { robot })?;

    let mut current = origin;
    let mut cells = Vec::new();
    loop {
        let next = current.step(direction);
        if !geometry.in_bounds(next) {
            break;
        }
        if geometry.blocks(current, direction) {
            break;
        }
        if positions.is_occupied(next, robot) {
            break;
        }
        trace!("{robot} slides {direction} from {current} to {next}");
        current = next;
        cells.push(next);
    }

    Ok(Slide {
        robot,
        direction,
        origin,
        cells,
    })
}

/// Replays a board's history, yielding one [`Slide`] per recorded move.
///
/// The board itself is never mutated; the replay tracks positions on a copy.
#[derive(Debug)]
pub struct Replay<'board> {
    geometry: &'board GridGeometry,
    history: slice::Iter<'board, MoveCommand>,
    positions: RobotPositions,
}

impl<'board> Replay<'board> {
    /// Starts a replay from the board's initial positions.
    #[must_use]
    pub fn new(board: &'board Board) -> Self {
        Self {
            geometry: query::geometry(board),
            history: query::history(board).iter(),
            positions: query::positions(board).clone(),
        }
    }

    /// Committed positions after the slides yielded so far.
    #[must_use]
    pub fn positions(&self) -> &RobotPositions {
        &self.positions
    }

    /// Consumes the replay, returning the committed positions reached so far.
    #[must_use]
    pub fn into_positions(self) -> RobotPositions {
        self.positions
    }

    fn advance(&mut self, command: MoveCommand) -> Result<Slide, BoardError> {
        let slide = resolve_slide(
            self.geometry,
            &self.positions,
            command.robot,
            command.direction,
        )?;
        if !slide.is_blocked() {
            self.positions
                .relocate(slide.robot(), slide.destination())?;
        }
        Ok(slide)
    }
}

impl Iterator for Replay<'_> {
    type Item = Result<Slide, BoardError>;

    fn next(&mut self) -> Option<Self::Item> {
        let command = *self.history.next()?;
        Some(self.advance(command))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.history.size_hint()
    }
}

/// Replays the full history and returns the final committed positions.
pub fn settle(board: &Board) -> Result<RobotPositions, BoardError> {
    let mut replay = Replay::new(board);
    for slide in replay.by_ref() {
        let _ = slide?;
    }
    Ok(replay.into_positions())
}
