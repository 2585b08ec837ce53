//! Movement rules - how far a vehicle may slide
//!
//! A vehicle slides only along its own axis. A requested move walks cell by
//! cell from the vehicle's leading edge and stops at the grid boundary, at the
//! first occupied cell, or when the requested distance is reached, whichever
//! comes first.

use crate::board::{Board, Occupancy};
use crate::types::{Axis, Vehicle, FULL_REACH};

/// Furthest legal slide in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reach {
    /// Non-positive: cells available toward row/column 0.
    pub backward: i32,
    /// Non-negative: cells available toward the far edge.
    pub forward: i32,
}

/// Signed number of cells vehicle `index` may actually slide toward `desired`.
///
/// The result has the sign of `desired` (or is 0) and never exceeds it in
/// magnitude. Passing [`FULL_REACH`] (or its negation) asks for the full
/// distance available. An out-of-range `index` yields 0.
///
/// ```
/// use slide_puzzle_core::{movement::allowed_delta, Board};
/// use slide_puzzle_core::types::ExitSide;
///
/// let board = Board::parse(ExitSide::Right, "
///     ......
///     ......
///     ......
///     **..A.
///     ....A.
///     ......
/// ").unwrap();
/// assert_eq!(allowed_delta(&board, 0, 10), 2);
/// assert_eq!(allowed_delta(&board, 0, -3), 0);
/// assert_eq!(allowed_delta(&board, 1, -10), -3);
/// ```
pub fn allowed_delta(board: &Board, index: usize, desired: i32) -> i32 {
    let Some(vehicle) = board.vehicle(index) else {
        return 0;
    };
    if desired == 0 {
        return 0;
    }
    let grid = board.occupancy(Some(index));
    allowed_delta_in(&grid, vehicle, desired)
}

/// [`allowed_delta`] with the axis named by the caller.
///
/// A request along the axis the vehicle does not slide on is refused with 0.
pub fn allowed_delta_on_axis(board: &Board, index: usize, axis: Axis, desired: i32) -> i32 {
    match board.vehicle(index) {
        Some(vehicle) if vehicle.axis() == axis => allowed_delta(board, index, desired),
        _ => 0,
    }
}

/// Maximum slide in both directions for vehicle `index`.
pub fn reach(board: &Board, index: usize) -> Reach {
    let Some(vehicle) = board.vehicle(index) else {
        return Reach::default();
    };
    let grid = board.occupancy(Some(index));
    reach_in(&grid, vehicle)
}

/// Reach of `vehicle` on a grid that does not include the vehicle itself.
pub(crate) fn reach_in(grid: &Occupancy, vehicle: &Vehicle) -> Reach {
    Reach {
        backward: allowed_delta_in(grid, vehicle, -FULL_REACH),
        forward: allowed_delta_in(grid, vehicle, FULL_REACH),
    }
}

/// Walk from the leading edge of `vehicle` in the direction of `desired`.
///
/// `grid` must not contain `vehicle`.
pub(crate) fn allowed_delta_in(grid: &Occupancy, vehicle: &Vehicle, desired: i32) -> i32 {
    if desired == 0 {
        return 0;
    }
    let forward = desired > 0;
    let limit = desired.unsigned_abs();

    let (mut row, mut col) = if forward {
        (vehicle.last_row() as i32, vehicle.last_col() as i32)
    } else {
        (vehicle.row as i32, vehicle.col as i32)
    };
    let step = if forward { 1 } else { -1 };
    let (d_row, d_col) = if vehicle.horizontal { (0, step) } else { (step, 0) };

    let mut steps: u32 = 0;
    while steps < limit {
        row += d_row;
        col += d_col;
        if !grid.is_free(row, col) {
            break;
        }
        steps += 1;
    }

    // steps is bounded by the grid dimension
    steps as i32 * step
}
