//! Placement errors - why a vehicle list cannot form a board

use crate::types::{MAX_GRID_DIM, MAX_VEHICLES, MIN_GRID_DIM, MIN_VEHICLE_LENGTH};

/// Rejection reasons for [`Board::new`](crate::Board::new) and
/// [`Board::parse`](crate::Board::parse).
///
/// Indices refer to the position in the vehicle list handed to the
/// constructor (for parsed boards: order of first appearance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error(
        "grid {rows}x{cols} is outside the supported range {}..={}",
        MIN_GRID_DIM,
        MAX_GRID_DIM
    )]
    GridSize { rows: usize, cols: usize },
    #[error("{count} vehicles exceed the limit of {}", MAX_VEHICLES)]
    TooManyVehicles { count: usize },
    #[error("vehicle {index} has length {length}, minimum is {}", MIN_VEHICLE_LENGTH)]
    VehicleTooShort { index: usize, length: u8 },
    #[error("vehicle {index} extends past the grid")]
    OutOfBounds { index: usize },
    #[error("vehicle {index} overlaps another vehicle")]
    Overlap { index: usize },
    #[error("expected exactly one goal vehicle, found {count}")]
    GoalCount { count: usize },
    #[error("row {line} has a different width than the first row")]
    RaggedRows { line: usize },
    #[error("cells labelled '{label}' do not form a straight contiguous vehicle")]
    BadShape { label: char },
}

impl PlacementError {
    /// Stable snake_case identifier (used on the wire).
    pub fn code(self) -> &'static str {
        match self {
            PlacementError::GridSize { .. } => "grid_size",
            PlacementError::TooManyVehicles { .. } => "too_many_vehicles",
            PlacementError::VehicleTooShort { .. } => "vehicle_too_short",
            PlacementError::OutOfBounds { .. } => "out_of_bounds",
            PlacementError::Overlap { .. } => "overlap",
            PlacementError::GoalCount { .. } => "goal_count",
            PlacementError::RaggedRows { .. } => "ragged_rows",
            PlacementError::BadShape { .. } => "bad_shape",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_mention_limits() {
        let err = PlacementError::GridSize { rows: 2, cols: 6 };
        assert_eq!(err.to_string(), "grid 2x6 is outside the supported range 3..=12");
        assert_eq!(err.code(), "grid_size");

        let err = PlacementError::VehicleTooShort { index: 4, length: 1 };
        assert_eq!(err.to_string(), "vehicle 4 has length 1, minimum is 2");
    }
}
