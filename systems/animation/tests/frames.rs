use ricochet_circuits_core::{BoardError, CellCoord, Direction, Motion, RobotId, RobotPose};
use ricochet_circuits_system_animation::{expand_history, Storyboard};
use ricochet_circuits_world::{Board, MoveLog};

fn board_with_robot(columns: u32, rows: u32) -> (Board, RobotId) {
    let mut board = Board::new(columns, rows);
    let robot = board.spawn_robot(Some("R"));
    board
        .put(robot, CellCoord::new(0, 0))
        .expect("placement succeeds");
    (board, robot)
}

fn poses(storyboard: &Storyboard, robot: RobotId) -> Vec<RobotPose> {
    storyboard
        .frames()
        .iter()
        .map(|frame| frame.pose(robot).expect("robot present in every frame"))
        .collect()
}

#[test]
fn history_free_board_yields_only_the_initial_snapshot() {
    let (board, robot) = board_with_robot(3, 3);
    let storyboard = expand_history(&board).expect("history expands");

    assert_eq!(storyboard.len(), 1);
    assert_eq!(
        storyboard.frames()[0].pose(robot),
        Some(RobotPose::at_rest(CellCoord::new(0, 0)))
    );
}

#[test]
fn open_corridor_move_yields_half_and_full_step_per_cell() {
    let (mut board, robot) = board_with_robot(4, 1);
    board
        .move_robot(robot, Direction::Right)
        .expect("move recorded");

    let storyboard = expand_history(&board).expect("history expands");

    assert_eq!(storyboard.len(), 1 + 6);
    assert_eq!(
        poses(&storyboard, robot),
        vec![
            RobotPose::at_rest(CellCoord::new(0, 0)),
            RobotPose::half_step(CellCoord::new(0, 0), Direction::Right),
            RobotPose::at_rest(CellCoord::new(1, 0)),
            RobotPose::half_step(CellCoord::new(1, 0), Direction::Right),
            RobotPose::at_rest(CellCoord::new(2, 0)),
            RobotPose::half_step(CellCoord::new(2, 0), Direction::Right),
            RobotPose::at_rest(CellCoord::new(3, 0)),
        ]
    );
}

#[test]
fn half_steps_render_between_cells() {
    let (mut board, robot) = board_with_robot(1, 3);
    board
        .move_robot(robot, Direction::Down)
        .expect("move recorded");

    let storyboard = expand_history(&board).expect("history expands");
    let positions: Vec<_> = poses(&storyboard, robot)
        .iter()
        .map(RobotPose::render_position)
        .collect();

    assert_eq!(
        positions,
        vec![(0.0, 0.0), (0.0, 0.5), (0.0, 1.0), (0.0, 1.5), (0.0, 2.0)]
    );
}

#[test]
fn blocked_move_contributes_no_snapshots() {
    let (mut board, robot) = board_with_robot(2, 1);
    board.put_vertical_wall(CellCoord::new(1, 0));
    board
        .move_robot(robot, Direction::Right)
        .expect("move recorded");

    let storyboard = expand_history(&board).expect("history expands");

    assert_eq!(storyboard.len(), 1);
}

#[test]
fn occupied_cell_limits_the_move_to_two_snapshots() {
    let (mut board, robot) = board_with_robot(3, 1);
    let blocker = board.spawn_robot(None);
    board
        .put(blocker, CellCoord::new(2, 0))
        .expect("placement succeeds");
    board
        .move_robot(robot, Direction::Right)
        .expect("move recorded");

    let storyboard = expand_history(&board).expect("history expands");

    assert_eq!(storyboard.len(), 1 + 2);
    for frame in storyboard.frames() {
        assert_eq!(
            frame.pose(blocker),
            Some(RobotPose::at_rest(CellCoord::new(2, 0)))
        );
    }
    assert_eq!(
        storyboard.frames().last().and_then(|frame| frame.pose(robot)),
        Some(RobotPose::at_rest(CellCoord::new(1, 0)))
    );
}

#[test]
fn only_the_moving_robot_is_ever_in_flight() {
    let mut board = Board::new(4, 4);
    let first = board.spawn_robot(Some("1"));
    let second = board.spawn_robot(Some("2"));
    board
        .put(first, CellCoord::new(0, 0))
        .expect("placement succeeds");
    board
        .put(second, CellCoord::new(3, 3))
        .expect("placement succeeds");
    board
        .move_robot(first, Direction::Down)
        .expect("move recorded");
    board
        .move_robot(second, Direction::Left)
        .expect("move recorded");

    let storyboard = expand_history(&board).expect("history expands");

    for frame in storyboard.frames() {
        let in_flight = frame
            .iter()
            .filter(|snapshot| matches!(snapshot.pose.motion, Motion::HalfStep(_)))
            .count();
        assert!(in_flight <= 1);
    }
    // first slides 3 cells down, second slides left until blocked by first at (0, 3).
    assert_eq!(storyboard.len(), 1 + 6 + 4);
}

#[test]
fn expansion_is_deterministic_and_leaves_board_untouched() {
    let (mut board, robot) = board_with_robot(5, 5);
    board.put_horizontal_wall(CellCoord::new(4, 3));
    for direction in [Direction::Right, Direction::Down, Direction::Left] {
        board.move_robot(robot, direction).expect("move recorded");
    }

    let first = expand_history(&board).expect("history expands");
    let second = expand_history(&board).expect("history expands");

    assert_eq!(first, second);
    assert_eq!(
        first.frames()[0].pose(robot),
        Some(RobotPose::at_rest(CellCoord::new(0, 0)))
    );
}

#[test]
fn labels_are_carried_by_the_scenery() {
    let mut board = Board::new(2, 1);
    let labelled = board.spawn_robot(Some("S"));
    let plain = board.spawn_robot(None);
    board
        .put(labelled, CellCoord::new(0, 0))
        .expect("placement succeeds");
    board
        .put(plain, CellCoord::new(1, 0))
        .expect("placement succeeds");

    let storyboard = expand_history(&board).expect("history expands");

    assert_eq!(storyboard.scenery().label(labelled), Some("S"));
    assert_eq!(storyboard.scenery().label(plain), None);
    assert_eq!(storyboard.scenery().columns(), 2);
    assert_eq!(storyboard.scenery().rows(), 1);
}

#[test]
fn unplaced_robot_moves_never_reach_the_history() {
    let mut board = Board::new(1, 1);
    let robot = board.spawn_robot(None);

    assert_eq!(
        board.move_robot(robot, Direction::Up),
        Err(BoardError::UnknownRobotMove { robot })
    );
    let storyboard = expand_history(&board).expect("empty history expands");
    assert_eq!(storyboard.len(), 1);
}
