//! Board module - grid dimensions, vehicles and derived occupancy
//!
//! A [`Board`] is one puzzle instance: fixed `rows x cols` dimensions, a fixed
//! exit side, and an ordered list of vehicles. The vehicle index is its
//! identity for moves and for state hashing.
//!
//! [`Occupancy`] is the derived cell grid. It uses a flat, fixed-size array
//! (row-major, `row * cols + col`) so rebuilding it for every move query does
//! not allocate.

use crate::error::PlacementError;
use crate::movement;
use crate::types::{
    ExitSide, Vehicle, MAX_CELLS, MAX_GRID_DIM, MAX_VEHICLES, MIN_GRID_DIM, MIN_VEHICLE_LENGTH,
};

/// Occupied/free cells of a board, optionally ignoring one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    rows: u8,
    cols: u8,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: [bool; MAX_CELLS],
}

impl Occupancy {
    /// Create an empty grid. Dimensions are clamped to `MAX_GRID_DIM`.
    pub fn new(rows: u8, cols: u8) -> Self {
        Self {
            rows: rows.min(MAX_GRID_DIM),
            cols: cols.min(MAX_GRID_DIM),
            cells: [false; MAX_CELLS],
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= self.rows as i32 || col < 0 || col >= self.cols as i32 {
            return None;
        }
        Some((row as usize) * (self.cols as usize) + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Get cell at position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<bool> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(false))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(true))
    }

    /// Check if every cell of `vehicle` lies on the grid.
    pub fn contains(&self, vehicle: &Vehicle) -> bool {
        let (row_end, col_end) = if vehicle.horizontal {
            (vehicle.row as u16 + 1, vehicle.col as u16 + vehicle.length as u16)
        } else {
            (vehicle.row as u16 + vehicle.length as u16, vehicle.col as u16 + 1)
        };
        row_end <= self.rows as u16 && col_end <= self.cols as u16
    }

    /// Check if `vehicle` lies on the grid and covers only free cells.
    pub fn fits(&self, vehicle: &Vehicle) -> bool {
        self.contains(vehicle)
            && vehicle
                .cells()
                .all(|(row, col)| self.is_free(row as i32, col as i32))
    }

    /// Mark every in-bounds cell of `vehicle` as occupied.
    pub fn mark(&mut self, vehicle: &Vehicle) {
        if !self.contains(vehicle) {
            return;
        }
        for (row, col) in vehicle.cells() {
            if let Some(idx) = self.index(row as i32, col as i32) {
                self.cells[idx] = true;
            }
        }
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.cells().iter().filter(|&&cell| cell).count()
    }

    /// The live cells (`rows * cols`, row-major).
    pub fn cells(&self) -> &[bool] {
        &self.cells[..(self.rows as usize) * (self.cols as usize)]
    }
}

/// Check grid dimensions against the supported range.
pub(crate) fn validate_grid(rows: usize, cols: usize) -> Result<(u8, u8), PlacementError> {
    let range = MIN_GRID_DIM as usize..=MAX_GRID_DIM as usize;
    if !range.contains(&rows) || !range.contains(&cols) {
        return Err(PlacementError::GridSize { rows, cols });
    }
    Ok((rows as u8, cols as u8))
}

/// One puzzle instance: grid, exit side and vehicles.
///
/// Construction through [`Board::new`] guarantees the invariants every other
/// operation relies on: all vehicles in bounds, no overlap, exactly one goal
/// vehicle. The only mutator is [`Board::slide`], which applies a legal delta.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: u8,
    cols: u8,
    exit: ExitSide,
    vehicles: Vec<Vehicle>,
}

impl Board {
    /// Validate and build a board.
    ///
    /// ```
    /// use slide_puzzle_core::{Board, PlacementError};
    /// use slide_puzzle_core::types::{ExitSide, Vehicle};
    ///
    /// let board = Board::new(6, 6, ExitSide::Right, vec![
    ///     Vehicle::goal(3, 0, 2, true),
    ///     Vehicle::obstacle(2, 3, 3, false),
    /// ]).unwrap();
    /// assert_eq!(board.vehicles().len(), 2);
    ///
    /// let err = Board::new(6, 6, ExitSide::Right, vec![
    ///     Vehicle::goal(3, 0, 2, true),
    ///     Vehicle::obstacle(3, 1, 2, true),
    /// ]).unwrap_err();
    /// assert_eq!(err, PlacementError::Overlap { index: 1 });
    /// ```
    pub fn new(
        rows: usize,
        cols: usize,
        exit: ExitSide,
        vehicles: Vec<Vehicle>,
    ) -> Result<Self, PlacementError> {
        let (rows, cols) = validate_grid(rows, cols)?;
        if vehicles.len() > MAX_VEHICLES {
            return Err(PlacementError::TooManyVehicles {
                count: vehicles.len(),
            });
        }

        let mut grid = Occupancy::new(rows, cols);
        for (index, vehicle) in vehicles.iter().enumerate() {
            if vehicle.length < MIN_VEHICLE_LENGTH {
                return Err(PlacementError::VehicleTooShort {
                    index,
                    length: vehicle.length,
                });
            }
            if !grid.contains(vehicle) {
                return Err(PlacementError::OutOfBounds { index });
            }
            if !grid.fits(vehicle) {
                return Err(PlacementError::Overlap { index });
            }
            grid.mark(vehicle);
        }

        let goals = vehicles.iter().filter(|v| v.is_goal).count();
        if goals != 1 {
            return Err(PlacementError::GoalCount { count: goals });
        }

        Ok(Self::from_parts(rows, cols, exit, vehicles))
    }

    /// Assemble a board whose invariants the caller already enforced.
    pub(crate) fn from_parts(rows: u8, cols: u8, exit: ExitSide, vehicles: Vec<Vehicle>) -> Self {
        Self {
            rows,
            cols,
            exit,
            vehicles,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn exit(&self) -> ExitSide {
        self.exit
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get(index)
    }

    pub fn into_vehicles(self) -> Vec<Vehicle> {
        self.vehicles
    }

    /// Index of the goal vehicle.
    pub fn goal_index(&self) -> Option<usize> {
        self.vehicles.iter().position(|v| v.is_goal)
    }

    pub fn goal(&self) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.is_goal)
    }

    /// Build the occupancy grid, skipping vehicle `excluding` if given.
    ///
    /// Excluding a vehicle is how its own moves are tested: it must never
    /// block itself.
    pub fn occupancy(&self, excluding: Option<usize>) -> Occupancy {
        let mut grid = Occupancy::new(self.rows, self.cols);
        for (i, vehicle) in self.vehicles.iter().enumerate() {
            if excluding == Some(i) {
                continue;
            }
            grid.mark(vehicle);
        }
        grid
    }

    /// Slide vehicle `index` up to `desired` cells and return the delta applied.
    ///
    /// The applied delta is what [`movement::allowed_delta`] permits, so the
    /// board stays valid.
    pub fn slide(&mut self, index: usize, desired: i32) -> i32 {
        let delta = movement::allowed_delta(self, index, desired);
        if delta != 0 {
            self.vehicles[index] = self.vehicles[index].shifted(delta);
        }
        delta
    }

    /// Put every vehicle at the along-axis offset given for it.
    ///
    /// `offsets` must come from a legal arrangement of these same vehicles.
    pub(crate) fn restore(&mut self, offsets: &[u8]) {
        for (vehicle, &offset) in self.vehicles.iter_mut().zip(offsets) {
            *vehicle = vehicle.shifted(offset as i32 - vehicle.offset() as i32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::new(
            6,
            6,
            ExitSide::Right,
            vec![
                Vehicle::goal(3, 0, 2, true),
                Vehicle::obstacle(2, 3, 3, false),
                Vehicle::obstacle(0, 0, 3, true),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_occupancy_index_calculation() {
        let grid = Occupancy::new(6, 6);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(0, 5), Some(5));
        assert_eq!(grid.index(1, 0), Some(6));
        assert_eq!(grid.index(5, 5), Some(35));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(0, 6), None);
        assert_eq!(grid.index(6, 0), None);
    }

    #[test]
    fn test_restore_moves_vehicles_along_their_axis() {
        let mut board = sample();
        board.restore(&[2, 1, 3]);
        assert_eq!(board.vehicles()[0], Vehicle::goal(3, 2, 2, true));
        assert_eq!(board.vehicles()[1], Vehicle::obstacle(1, 3, 3, false));
        assert_eq!(board.vehicles()[2], Vehicle::obstacle(0, 3, 3, true));

        board.restore(&[0, 2, 0]);
        assert_eq!(board, sample());
    }

    #[test]
    fn test_occupancy_marks_all_vehicles() {
        let board = sample();
        let grid = board.occupancy(None);
        assert_eq!(grid.count(), 2 + 3 + 3);
        assert!(grid.is_occupied(3, 1));
        assert!(grid.is_occupied(4, 3));
        assert!(grid.is_occupied(0, 2));
        assert!(grid.is_free(5, 5));
        assert!(!grid.is_free(6, 0));
    }

    #[test]
    fn test_occupancy_excluding_never_blocks_itself() {
        let board = sample();
        for (i, vehicle) in board.vehicles().iter().enumerate() {
            let grid = board.occupancy(Some(i));
            for (row, col) in vehicle.cells() {
                assert!(grid.is_free(row as i32, col as i32));
            }
        }
    }

    #[test]
    fn test_new_rejects_bad_placements() {
        let out = Board::new(6, 6, ExitSide::Right, vec![Vehicle::goal(3, 5, 2, true)]);
        assert_eq!(out, Err(PlacementError::OutOfBounds { index: 0 }));

        let short = Board::new(
            6,
            6,
            ExitSide::Right,
            vec![Vehicle::goal(3, 0, 2, true), Vehicle::obstacle(0, 0, 1, true)],
        );
        assert_eq!(
            short,
            Err(PlacementError::VehicleTooShort {
                index: 1,
                length: 1
            })
        );

        let no_goal = Board::new(6, 6, ExitSide::Right, vec![Vehicle::obstacle(0, 0, 2, true)]);
        assert_eq!(no_goal, Err(PlacementError::GoalCount { count: 0 }));

        let tiny = Board::new(2, 6, ExitSide::Right, vec![Vehicle::goal(1, 0, 2, true)]);
        assert_eq!(tiny, Err(PlacementError::GridSize { rows: 2, cols: 6 }));
    }

    #[test]
    fn test_contains_does_not_overflow() {
        let grid = Occupancy::new(6, 6);
        assert!(!grid.contains(&Vehicle::obstacle(0, 250, 10, true)));
        assert!(!grid.fits(&Vehicle::obstacle(250, 0, 10, false)));
    }

    #[test]
    fn test_slide_applies_allowed_delta() {
        let mut board = sample();
        // Goal lane is blocked at column 3 by the vertical obstacle.
        assert_eq!(board.slide(0, 5), 1);
        assert_eq!(board.vehicles()[0].col, 1);
        assert_eq!(board.slide(0, -5), -1);
        assert_eq!(board.vehicles()[0].col, 0);
    }
}
