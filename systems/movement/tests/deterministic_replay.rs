use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use ricochet_circuits_core::{CellCoord, Direction, RobotId};
use ricochet_circuits_system_movement::Replay;
use ricochet_circuits_world::{Board, MoveLog};

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let board = scripted_board();
    let first = replay(&board);
    let second = replay(&board);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());

    let rebuilt = replay(&scripted_board());
    assert_eq!(first, rebuilt, "identically built boards diverged");
}

fn replay(board: &Board) -> ReplayOutcome {
    let mut slides = Vec::new();
    let mut replay = Replay::new(board);
    for slide in replay.by_ref() {
        let slide = slide.expect("scripted history replays");
        slides.push(SlideRecord {
            robot: slide.robot(),
            direction: slide.direction(),
            cells: slide.cells().to_vec(),
        });
    }

    let robots = replay.into_positions().iter().collect();
    ReplayOutcome { robots, slides }
}

fn scripted_board() -> Board {
    let mut board = Board::new(6, 5);
    board.put_vertical_wall(CellCoord::new(4, 0));
    board.put_horizontal_wall(CellCoord::new(2, 3));
    board.put_horizontal_wall(CellCoord::new(5, 4));

    let a = board.spawn_robot(Some("A"));
    let b = board.spawn_robot(Some("B"));
    let c = board.spawn_robot(None);
    for (robot, cell) in [
        (a, CellCoord::new(0, 0)),
        (b, CellCoord::new(2, 0)),
        (c, CellCoord::new(5, 2)),
    ] {
        board.put(robot, cell).expect("placement succeeds");
    }

    for (robot, direction) in [
        (a, Direction::Right),
        (b, Direction::Down),
        (b, Direction::Right),
        (c, Direction::Down),
        (a, Direction::Down),
        (a, Direction::Right),
        (c, Direction::Left),
        (b, Direction::Up),
    ] {
        board
            .move_robot(robot, direction)
            .expect("move recorded");
    }
    board
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    robots: Vec<(RobotId, CellCoord)>,
    slides: Vec<SlideRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SlideRecord {
    robot: RobotId,
    direction: Direction,
    cells: Vec<CellCoord>,
}
