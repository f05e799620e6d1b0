#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame generator that expands a board's move history into snapshots.
//!
//! The first snapshot shows the board before any move. Every committed cell
//! of every slide then contributes two snapshots: the moving robot drawn
//! halfway toward the cell, followed by the robot resting on it. Moves that
//! cannot leave their origin contribute nothing.

use std::{collections::BTreeMap, time::Duration};

use log::debug;
use ricochet_circuits_core::{BoardError, CellCoord, RobotId, RobotPose};
use ricochet_circuits_system_movement::Replay;
use ricochet_circuits_world::{query, Board, RobotPositions};

const DEFAULT_FRAME_UNIT: Duration = Duration::from_millis(40);
const DEFAULT_HOLD_FACTOR: u32 = 10;

/// Static part of every snapshot: dimensions, walls and robot labels.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Scenery {
    columns: u32,
    rows: u32,
    horizontal_walls: Vec<CellCoord>,
    vertical_walls: Vec<CellCoord>,
    labels: BTreeMap<RobotId, String>,
}

impl Scenery {
    /// Captures the static layout of a board.
    #[must_use]
    pub fn capture(board: &Board) -> Self {
        let geometry = query::geometry(board);
        let labels = query::robots(board)
            .iter()
            .filter_map(|robot| {
                query::label(board, *robot).map(|label| (*robot, label.to_owned()))
            })
            .collect();

        Self {
            columns: geometry.columns(),
            rows: geometry.rows(),
            horizontal_walls: geometry.horizontal_walls().iter().collect(),
            vertical_walls: geometry.vertical_walls().iter().collect(),
            labels,
        }
    }

    /// Number of cell columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Horizontal walls in coordinate order.
    #[must_use]
    pub fn horizontal_walls(&self) -> &[CellCoord] {
        &self.horizontal_walls
    }

    /// Vertical walls in coordinate order.
    #[must_use]
    pub fn vertical_walls(&self) -> &[CellCoord] {
        &self.vertical_walls
    }

    /// Display label of a robot, if it has one.
    #[must_use]
    pub fn label(&self, robot: RobotId) -> Option<&str> {
        self.labels.get(&robot).map(String::as_str)
    }
}

/// Pose of a single robot within a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RobotSnapshot {
    /// Robot being drawn.
    pub robot: RobotId,
    /// Committed cell and interpolation state.
    pub pose: RobotPose,
}

/// Robot poses captured at one point of the replay, ordered by robot id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameSnapshot {
    robots: Vec<RobotSnapshot>,
}

impl FrameSnapshot {
    fn capture(positions: &RobotPositions, moving: Option<(RobotId, RobotPose)>) -> Self {
        let robots = positions
            .iter()
            .map(|(robot, cell)| {
                let pose = match moving {
                    Some((moving, pose)) if moving == robot => pose,
                    _ => RobotPose::at_rest(cell),
                };
                RobotSnapshot { robot, pose }
            })
            .collect();
        Self { robots }
    }

    /// Iterator over robot poses in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &RobotSnapshot> {
        self.robots.iter()
    }

    /// Pose of the provided robot, if it is on the board.
    #[must_use]
    pub fn pose(&self, robot: RobotId) -> Option<RobotPose> {
        self.robots
            .iter()
            .find(|snapshot| snapshot.robot == robot)
            .map(|snapshot| snapshot.pose)
    }
}

/// Ordered snapshots of a replayed history sharing one [`Scenery`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Storyboard {
    scenery: Scenery,
    frames: Vec<FrameSnapshot>,
}

impl Storyboard {
    /// Static layout shared by every frame.
    #[must_use]
    pub fn scenery(&self) -> &Scenery {
        &self.scenery
    }

    /// Snapshots in playback order. Never empty.
    #[must_use]
    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    /// Number of snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`: the initial snapshot is present even without history.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Display durations for every frame under the provided timing.
    #[must_use]
    pub fn durations(&self, timing: FrameTiming) -> Vec<Duration> {
        timing.durations(self.frames.len())
    }
}

/// Display timing applied when frames are handed to an encoder.
///
/// Interior frames last one `unit`; the first and last frames are held for
/// `hold_factor` units so the start and end states are readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTiming {
    /// Duration of an interior frame.
    pub unit: Duration,
    /// Multiplier applied to the first and last frames.
    pub hold_factor: u32,
}

impl FrameTiming {
    /// Creates a timing with the provided interior duration and hold factor.
    #[must_use]
    pub const fn new(unit: Duration, hold_factor: u32) -> Self {
        Self { unit, hold_factor }
    }

    /// Per-frame durations for a sequence of `frame_count` frames.
    #[must_use]
    pub fn durations(&self, frame_count: usize) -> Vec<Duration> {
        let mut durations = vec![self.unit; frame_count];
        let held = self.unit.saturating_mul(self.hold_factor);
        if let Some(first) = durations.first_mut() {
            *first = held;
        }
        if let Some(last) = durations.last_mut() {
            *last = held;
        }
        durations
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_UNIT, DEFAULT_HOLD_FACTOR)
    }
}

/// Replays the board's history and returns every animation snapshot.
///
/// The board is only read; calling this twice yields identical storyboards.
pub fn expand_history(board: &Board) -> Result<Storyboard, BoardError> {
    let scenery = Scenery::capture(board);
    let mut replay = Replay::new(board);
    let mut frames = vec![FrameSnapshot::capture(replay.positions(), None)];

    while let Some(slide) = replay.next() {
        let slide = slide?;
        let mut previous = slide.origin();
        for cell in slide.cells() {
            let half_step = RobotPose::half_step(previous, slide.direction());
            frames.push(FrameSnapshot::capture(
                replay.positions(),
                Some((slide.robot(), half_step)),
            ));
            frames.push(FrameSnapshot::capture(
                replay.positions(),
                Some((slide.robot(), RobotPose::at_rest(*cell))),
            ));
            previous = *cell;
        }
    }

    debug!(
        "expanded {} moves into {} frames",
        query::history(board).len(),
        frames.len()
    );
    Ok(Storyboard { scenery, frames })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_holds_first_and_last_frames() {
        let durations = FrameTiming::default().durations(4);
        assert_eq!(
            durations,
            vec![
                Duration::from_millis(400),
                Duration::from_millis(40),
                Duration::from_millis(40),
                Duration::from_millis(400),
            ]
        );
    }

    #[test]
    fn single_frame_is_held() {
        let durations = FrameTiming::new(Duration::from_millis(10), 3).durations(1);
        assert_eq!(durations, vec![Duration::from_millis(30)]);
    }

    #[test]
    fn no_frames_yield_no_durations() {
        assert!(FrameTiming::default().durations(0).is_empty());
    }
}
