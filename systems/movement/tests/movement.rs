use ricochet_circuits_core::{BoardError, CellCoord, Direction, RobotId};
use ricochet_circuits_system_movement::{resolve_slide, settle, Replay, Slide};
use ricochet_circuits_world::{query, Board, MoveLog};

fn board_with_robot(columns: u32, rows: u32, cell: CellCoord) -> (Board, RobotId) {
    let mut board = Board::new(columns, rows);
    let robot = board.spawn_robot(Some("R"));
    board.put(robot, cell).expect("placement succeeds");
    (board, robot)
}

fn slide(board: &Board, robot: RobotId, direction: Direction) -> Slide {
    resolve_slide(
        query::geometry(board),
        query::positions(board),
        robot,
        direction,
    )
    .expect("robot is placed")
}

#[test]
fn open_corridor_slides_to_the_far_edge() {
    let (mut board, robot) = board_with_robot(4, 1, CellCoord::new(0, 0));
    board
        .move_robot(robot, Direction::Right)
        .expect("move recorded");

    let settled = settle(&board).expect("history replays");
    assert_eq!(settled.position(robot), Some(CellCoord::new(3, 0)));

    let slides: Vec<_> = Replay::new(&board)
        .collect::<Result<_, _>>()
        .expect("history replays");
    assert_eq!(slides.len(), 1);
    assert_eq!(slides[0].cells().len(), 3);
}

#[test]
fn wall_directly_ahead_blocks_the_move() {
    let (mut board, robot) = board_with_robot(2, 1, CellCoord::new(0, 0));
    board.put_vertical_wall(CellCoord::new(1, 0));

    let result = slide(&board, robot, Direction::Right);
    assert!(result.is_blocked());
    assert_eq!(result.destination(), CellCoord::new(0, 0));
}

#[test]
fn another_robot_stops_the_slide_one_cell_short() {
    let (mut board, robot) = board_with_robot(3, 1, CellCoord::new(0, 0));
    let blocker = board.spawn_robot(None);
    board
        .put(blocker, CellCoord::new(2, 0))
        .expect("placement succeeds");

    let result = slide(&board, robot, Direction::Right);
    assert_eq!(result.cells(), &[CellCoord::new(1, 0)]);
}

#[test]
fn moving_up_checks_the_wall_keyed_by_the_current_cell() {
    let (mut board, robot) = board_with_robot(1, 4, CellCoord::new(0, 3));
    board.put_horizontal_wall(CellCoord::new(0, 1));

    let result = slide(&board, robot, Direction::Up);
    assert_eq!(
        result.cells(),
        &[CellCoord::new(0, 2), CellCoord::new(0, 1)]
    );
}

#[test]
fn moving_down_checks_the_wall_keyed_by_the_destination_cell() {
    let (mut board, robot) = board_with_robot(1, 4, CellCoord::new(0, 0));
    board.put_horizontal_wall(CellCoord::new(0, 2));

    let result = slide(&board, robot, Direction::Down);
    assert_eq!(result.cells(), &[CellCoord::new(0, 1)]);
}

#[test]
fn moving_left_checks_the_wall_keyed_by_the_current_cell() {
    let (mut board, robot) = board_with_robot(4, 1, CellCoord::new(3, 0));
    board.put_vertical_wall(CellCoord::new(2, 0));

    let result = slide(&board, robot, Direction::Left);
    assert_eq!(result.cells(), &[CellCoord::new(2, 0)]);
}

#[test]
fn walls_on_other_rows_do_not_interfere() {
    let (mut board, robot) = board_with_robot(4, 2, CellCoord::new(0, 0));
    board.put_vertical_wall(CellCoord::new(2, 1));
    board.put_horizontal_wall(CellCoord::new(1, 1));

    let result = slide(&board, robot, Direction::Right);
    assert_eq!(result.destination(), CellCoord::new(3, 0));
}

#[test]
fn consecutive_moves_start_from_the_previous_destination() {
    let (mut board, robot) = board_with_robot(3, 3, CellCoord::new(0, 0));
    board
        .move_robot(robot, Direction::Right)
        .expect("move recorded");
    board
        .move_robot(robot, Direction::Down)
        .expect("move recorded");
    board
        .move_robot(robot, Direction::Left)
        .expect("move recorded");

    let destinations: Vec<_> = Replay::new(&board)
        .map(|slide| slide.map(|slide| slide.destination()))
        .collect::<Result<_, _>>()
        .expect("history replays");

    assert_eq!(
        destinations,
        vec![
            CellCoord::new(2, 0),
            CellCoord::new(2, 2),
            CellCoord::new(0, 2),
        ]
    );
}

#[test]
fn robots_that_moved_earlier_block_later_moves() {
    let mut board = Board::new(3, 3);
    let first = board.spawn_robot(Some("1"));
    let second = board.spawn_robot(Some("2"));
    board
        .put(first, CellCoord::new(0, 0))
        .expect("placement succeeds");
    board
        .put(second, CellCoord::new(2, 2))
        .expect("placement succeeds");
    board
        .move_robot(first, Direction::Down)
        .expect("move recorded");
    board
        .move_robot(second, Direction::Left)
        .expect("move recorded");

    let settled = settle(&board).expect("history replays");
    assert_eq!(settled.position(first), Some(CellCoord::new(0, 2)));
    assert_eq!(settled.position(second), Some(CellCoord::new(1, 2)));
}

#[test]
fn resolving_an_unplaced_robot_is_an_error() {
    let mut board = Board::new(2, 2);
    let ghost = board.spawn_robot(None);

    let error = resolve_slide(
        query::geometry(&board),
        query::positions(&board),
        ghost,
        Direction::Up,
    )
    .expect_err("unplaced robot cannot move");
    assert_eq!(error, BoardError::UnknownRobotMove { robot: ghost });
}
