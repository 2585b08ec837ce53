//! Goal evaluation - win detection and the "boring puzzle" filter

use crate::board::Board;
use crate::movement::allowed_delta_in;
use crate::types::{Axis, ExitSide, Vehicle, FULL_REACH};

/// Check if the goal vehicle sits on the exit lane with the right orientation.
fn on_exit_lane(board: &Board, goal: &Vehicle) -> bool {
    let exit = board.exit();
    if goal.axis() != exit.axis() {
        return false;
    }
    let lane = exit.lane(board.rows(), board.cols());
    match exit.axis() {
        Axis::Horizontal => goal.row == lane,
        Axis::Vertical => goal.col == lane,
    }
}

/// Cells between the goal vehicle's exit-facing edge and the exit boundary.
fn distance_to_exit(board: &Board, goal: &Vehicle) -> i32 {
    match board.exit() {
        ExitSide::Right => (board.cols() - 1 - goal.last_col()) as i32,
        ExitSide::Left => goal.col as i32,
        ExitSide::Top => goal.row as i32,
        ExitSide::Bottom => (board.rows() - 1 - goal.last_row()) as i32,
    }
}

/// Check if the board is won: the goal vehicle is aligned with the exit and
/// its exit-facing edge touches the boundary.
///
/// ```
/// use slide_puzzle_core::{goal::is_goal_state, Board};
/// use slide_puzzle_core::types::{ExitSide, Vehicle};
///
/// let won = Board::new(6, 6, ExitSide::Right, vec![Vehicle::goal(3, 4, 2, true)]).unwrap();
/// assert!(is_goal_state(&won));
///
/// let wrong_row = Board::new(6, 6, ExitSide::Right, vec![Vehicle::goal(2, 4, 2, true)]).unwrap();
/// assert!(!is_goal_state(&wrong_row));
/// ```
pub fn is_goal_state(board: &Board) -> bool {
    let Some(goal) = board.goal() else {
        return false;
    };
    on_exit_lane(board, goal) && distance_to_exit(board, goal) == 0
}

/// Check if the goal vehicle could drive out without any other vehicle moving.
///
/// True iff the goal vehicle is on the exit lane, correctly oriented, and
/// every cell between it and the exit boundary is empty. An already-won
/// board counts as trivially solvable.
pub fn is_trivially_solvable(board: &Board) -> bool {
    let (Some(index), Some(goal)) = (board.goal_index(), board.goal()) else {
        return false;
    };
    if !on_exit_lane(board, goal) {
        return false;
    }

    let grid = board.occupancy(Some(index));
    let toward_exit = FULL_REACH * board.exit().direction();
    let clear = allowed_delta_in(&grid, goal, toward_exit).abs();
    clear == distance_to_exit(board, goal)
}
