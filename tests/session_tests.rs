//! Session tests - drags, counters, retry and hints

use slide_puzzle::core::{Board, SolveOutcome, Solver};
use slide_puzzle::engine::{Session, SlideError};
use slide_puzzle::types::{Axis, ExitSide};

fn two_blockers() -> Session {
    let board = Board::parse(
        ExitSide::Right,
        "
        ......
        ......
        ..A.B.
        **A.B.
        ......
        ......
        ",
    )
    .unwrap();
    Session::new(board)
}

#[test]
fn test_following_hints_wins_in_optimal_obstacle_moves() {
    let mut session = two_blockers();
    let optimal = Solver::default()
        .solve(session.board())
        .obstacle_moves()
        .unwrap();

    let mut guard = 0;
    while let Some(hint) = session.hint() {
        let axis = session.board().vehicles()[hint.index].axis();
        assert_eq!(session.drag(hint.index, axis, hint.delta), Ok(hint.delta));
        guard += 1;
        assert!(guard < 20, "hints did not converge");
    }

    assert!(session.has_won());
    assert_eq!(session.obstacle_move_count(), optimal);
    assert!(session.move_count() >= session.obstacle_move_count());
}

#[test]
fn test_blocked_drag_is_not_a_move() {
    let mut session = two_blockers();
    let goal = session.board().goal_index().unwrap();
    assert_eq!(session.drag(goal, Axis::Horizontal, 5), Ok(0));
    assert_eq!(session.move_count(), 0);
}

#[test]
fn test_errors_carry_codes() {
    let mut session = two_blockers();
    let err = session.drag(10, Axis::Vertical, 1).unwrap_err();
    assert_eq!(err, SlideError::NoSuchVehicle);
    assert_eq!(err.code(), "invalid_slide");
    assert!(!err.message().is_empty());
    assert_eq!(SlideError::AlreadyWon.code(), "not_playable");
}

#[test]
fn test_try_again_after_progress() {
    let mut session = two_blockers();
    let start = session.board().clone();
    session.drag(0, Axis::Vertical, -2).unwrap();
    session.drag(1, Axis::Vertical, 2).unwrap();
    assert_eq!(session.obstacle_move_count(), 2);

    session.try_again();
    assert_eq!(session.board(), &start);
    assert_eq!(session.move_count(), 0);
    assert!(session.hint().is_some());
}

#[test]
fn test_generated_session_is_replayable() {
    let a = Session::generate(6, 6, ExitSide::Bottom, 3, 99).unwrap();
    let b = Session::generate(6, 6, ExitSide::Bottom, 3, 99).unwrap();
    assert_eq!(a.board(), b.board());
    assert_eq!(a.level(), 3);
    if a.verified() {
        assert!(matches!(
            Solver::default().solve(a.board()),
            SolveOutcome::Solved(_)
        ));
    }
}
