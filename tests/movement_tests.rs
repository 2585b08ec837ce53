//! Movement tests - slide limits against edges and other vehicles

use slide_puzzle::core::{allowed_delta, allowed_delta_on_axis, reach, Board, Reach};
use slide_puzzle::types::{Axis, ExitSide, FULL_REACH};

fn board() -> Board {
    // A(0) horizontal row 0, B(1) vertical col 4, goal(2), C(3) vertical col 2
    Board::parse(
        ExitSide::Right,
        "
        AAA.B.
        ....B.
        ......
        **....
        ..C...
        ..C...
        ",
    )
    .unwrap()
}

#[test]
fn test_result_has_sign_of_request_and_never_exceeds_it() {
    let board = board();
    for index in 0..board.vehicles().len() {
        for desired in -8..=8 {
            let delta = allowed_delta(&board, index, desired);
            assert!(delta.abs() <= desired.abs());
            assert!(delta == 0 || delta.signum() == desired.signum());
        }
    }
}

#[test]
fn test_stops_at_boundary() {
    let board = board();
    // A at cols 0-2 can reach col 3 only; B blocks col 4.
    assert_eq!(allowed_delta(&board, 0, 5), 1);
    assert_eq!(allowed_delta(&board, 0, -5), 0);
    // goal slides right to the edge
    assert_eq!(allowed_delta(&board, 2, FULL_REACH), 4);
    // C at rows 4-5 touches the bottom
    assert_eq!(allowed_delta(&board, 3, 1), 0);
}

#[test]
fn test_stops_at_first_occupied_cell() {
    let mut board = board();
    // C climbs until A's row
    assert_eq!(allowed_delta(&board, 3, -FULL_REACH), -3);
    assert_eq!(allowed_delta(&board, 3, -2), -2);

    // goal moved into C's column blocks it immediately
    assert_eq!(board.slide(2, 2), 2);
    assert_eq!(allowed_delta(&board, 3, -FULL_REACH), 0);
}

#[test]
fn test_reach_both_ways() {
    let board = board();
    assert_eq!(
        reach(&board, 1),
        Reach {
            backward: 0,
            forward: 4
        }
    );
    assert_eq!(
        reach(&board, 2),
        Reach {
            backward: 0,
            forward: 4
        }
    );
}

#[test]
fn test_external_form_checks_axis() {
    let board = board();
    assert_eq!(allowed_delta_on_axis(&board, 1, Axis::Vertical, 2), 2);
    assert_eq!(allowed_delta_on_axis(&board, 1, Axis::Horizontal, 2), 0);
    assert_eq!(allowed_delta_on_axis(&board, 7, Axis::Vertical, 2), 0);
}

#[test]
fn test_query_does_not_mutate() {
    let board = board();
    let before = board.clone();
    for index in 0..board.vehicles().len() {
        let _ = allowed_delta(&board, index, FULL_REACH);
        let _ = reach(&board, index);
    }
    assert_eq!(board, before);
}
