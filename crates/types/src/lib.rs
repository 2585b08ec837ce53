//! Shared puzzle types - vehicles, axes, exit sides and grid constants
//!
//! This crate defines the plain data shared by the solver, the generator,
//! the session layer and the wire adapter. Everything here is dependency-free
//! and `Copy` where it can be, so any layer can hold these values without
//! pulling in the rest of the engine.
//!
//! # Coordinates
//!
//! Cells are addressed as `(row, col)`, 0-based, with row 0 at the top and
//! column 0 at the left. A vehicle is anchored at its top-left cell and
//! extends `length` cells to the right (horizontal) or downwards (vertical).
//!
//! # Grid Limits
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_GRID_DIM` | 3 | Smallest accepted row/column count |
//! | `MAX_GRID_DIM` | 12 | Largest accepted row/column count |
//! | `MAX_CELLS` | 144 | Capacity of a fixed occupancy grid |
//! | `MAX_VEHICLES` | 48 | Most vehicles a board may hold |
//!
//! # Generation Constants
//!
//! - `MAX_GENERATION_ATTEMPTS`: 300 candidates before the unchecked fallback
//! - `MIN_OBSTACLE_TARGET`: at least 6 obstacle placements are attempted
//! - `CELLS_PER_OBSTACLE`: one obstacle attempt per 8 grid cells beyond that
//!
//! # Examples
//!
//! ```
//! use slide_puzzle_types::{Axis, ExitSide, Vehicle};
//!
//! let exit = ExitSide::from_str("right").unwrap();
//! assert_eq!(exit.axis(), Axis::Horizontal);
//!
//! let car = Vehicle::goal(3, 0, 2, true);
//! assert_eq!(car.axis(), Axis::Horizontal);
//! assert_eq!(car.last_col(), 1);
//! assert!(car.covers(3, 1));
//! ```

/// Default number of rows for generated boards.
pub const DEFAULT_ROWS: u8 = 6;

/// Default number of columns for generated boards.
pub const DEFAULT_COLS: u8 = 6;

/// Smallest accepted grid dimension.
pub const MIN_GRID_DIM: u8 = 3;

/// Largest accepted grid dimension.
pub const MAX_GRID_DIM: u8 = 12;

/// Cell capacity of a fixed occupancy grid (`MAX_GRID_DIM` squared).
pub const MAX_CELLS: usize = (MAX_GRID_DIM as usize) * (MAX_GRID_DIM as usize);

/// Maximum number of vehicles on one board.
pub const MAX_VEHICLES: usize = 48;

/// Shortest legal vehicle.
pub const MIN_VEHICLE_LENGTH: u8 = 2;

/// Length of the goal vehicle placed by the generator.
pub const GOAL_VEHICLE_LENGTH: u8 = 2;

/// Lengths the generator draws obstacles from (uniformly).
pub const OBSTACLE_LENGTHS: [u8; 2] = [2, 3];

/// Candidate boards tried before falling back to an unchecked one.
pub const MAX_GENERATION_ATTEMPTS: u32 = 300;

/// Floor for the number of obstacle placements attempted per candidate.
pub const MIN_OBSTACLE_TARGET: usize = 6;

/// Grid cells per attempted obstacle placement.
pub const CELLS_PER_OBSTACLE: usize = 8;

/// Desired delta meaning "as far as the lane allows".
///
/// Movement never walks further than the grid, so this resolves to the true
/// maximum reach instead of a partial failure.
pub const FULL_REACH: i32 = i32::MAX;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_limits_are_consistent() {
        assert!(MIN_GRID_DIM <= DEFAULT_ROWS && DEFAULT_ROWS <= MAX_GRID_DIM);
        assert!(MIN_GRID_DIM <= DEFAULT_COLS && DEFAULT_COLS <= MAX_GRID_DIM);
        assert_eq!(MAX_CELLS, 144);
        assert!(MAX_VEHICLES * MIN_VEHICLE_LENGTH as usize <= MAX_CELLS);
        assert!(GOAL_VEHICLE_LENGTH >= MIN_VEHICLE_LENGTH);
    }

    #[test]
    fn exit_side_round_trips_through_strings() {
        for side in [ExitSide::Left, ExitSide::Right, ExitSide::Top, ExitSide::Bottom] {
            assert_eq!(ExitSide::from_str(side.as_str()), Some(side));
        }
        assert_eq!(ExitSide::from_str("RIGHT"), Some(ExitSide::Right));
        assert_eq!(ExitSide::from_str("north"), None);
    }

    #[test]
    fn vehicle_cells_follow_axis() {
        let h = Vehicle::obstacle(2, 1, 3, true);
        assert_eq!(h.cells().collect::<Vec<_>>(), vec![(2, 1), (2, 2), (2, 3)]);

        let v = Vehicle::obstacle(0, 4, 2, false);
        assert_eq!(v.cells().collect::<Vec<_>>(), vec![(0, 4), (1, 4)]);
        assert_eq!(v.last_row(), 1);
        assert_eq!(v.last_col(), 4);
    }

    #[test]
    fn shifted_moves_along_own_axis_only() {
        let h = Vehicle::obstacle(2, 1, 3, true);
        let moved = h.shifted(2);
        assert_eq!((moved.row, moved.col), (2, 3));

        let v = Vehicle::goal(3, 2, 2, false);
        let moved = v.shifted(-3);
        assert_eq!((moved.row, moved.col), (0, 2));
        assert!(moved.is_goal);
    }
}

/// The axis a vehicle slides along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Parse axis from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "horizontal" | "h", "vertical" | "v".
    ///
    /// ```
    /// use slide_puzzle_types::Axis;
    ///
    /// assert_eq!(Axis::from_str("h"), Some(Axis::Horizontal));
    /// assert_eq!(Axis::from_str("Vertical"), Some(Axis::Vertical));
    /// assert_eq!(Axis::from_str("diagonal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "horizontal" | "h" => Some(Axis::Horizontal),
            "vertical" | "v" => Some(Axis::Vertical),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

/// The grid edge the goal vehicle has to reach.
///
/// The exit side fixes both the orientation the goal vehicle needs
/// (horizontal for left/right, vertical for top/bottom) and the lane it has
/// to sit in (the middle row for left/right, the middle column for top/bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl ExitSide {
    /// Parse exit side from string (case-insensitive)
    ///
    /// ```
    /// use slide_puzzle_types::ExitSide;
    ///
    /// assert_eq!(ExitSide::from_str("left"), Some(ExitSide::Left));
    /// assert_eq!(ExitSide::from_str("Bottom"), Some(ExitSide::Bottom));
    /// assert_eq!(ExitSide::from_str("up"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(ExitSide::Left),
            "right" => Some(ExitSide::Right),
            "top" => Some(ExitSide::Top),
            "bottom" => Some(ExitSide::Bottom),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitSide::Left => "left",
            ExitSide::Right => "right",
            ExitSide::Top => "top",
            ExitSide::Bottom => "bottom",
        }
    }

    /// Axis the goal vehicle must slide along to leave through this side.
    pub fn axis(&self) -> Axis {
        match self {
            ExitSide::Left | ExitSide::Right => Axis::Horizontal,
            ExitSide::Top | ExitSide::Bottom => Axis::Vertical,
        }
    }

    /// Sign of a delta that moves toward this side (+1 for right/bottom).
    pub fn direction(&self) -> i32 {
        match self {
            ExitSide::Right | ExitSide::Bottom => 1,
            ExitSide::Left | ExitSide::Top => -1,
        }
    }

    /// Index of the row (left/right) or column (top/bottom) the goal vehicle
    /// must occupy on a `rows x cols` grid.
    ///
    /// ```
    /// use slide_puzzle_types::ExitSide;
    ///
    /// assert_eq!(ExitSide::Right.lane(6, 6), 3);
    /// assert_eq!(ExitSide::Top.lane(5, 7), 3);
    /// ```
    pub fn lane(&self, rows: u8, cols: u8) -> u8 {
        match self.axis() {
            Axis::Horizontal => rows / 2,
            Axis::Vertical => cols / 2,
        }
    }
}

/// A rigid, axis-locked piece occupying `length` contiguous cells.
///
/// `row`/`col` is the top-left (minimum index) cell. Orientation never
/// changes once a vehicle exists; only the coordinate along its axis moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vehicle {
    pub row: u8,
    pub col: u8,
    pub length: u8,
    pub horizontal: bool,
    pub is_goal: bool,
}

impl Vehicle {
    pub fn new(row: u8, col: u8, length: u8, horizontal: bool, is_goal: bool) -> Self {
        Self {
            row,
            col,
            length,
            horizontal,
            is_goal,
        }
    }

    /// The goal vehicle at the given anchor.
    pub fn goal(row: u8, col: u8, length: u8, horizontal: bool) -> Self {
        Self::new(row, col, length, horizontal, true)
    }

    /// An obstacle vehicle at the given anchor.
    pub fn obstacle(row: u8, col: u8, length: u8, horizontal: bool) -> Self {
        Self::new(row, col, length, horizontal, false)
    }

    pub fn axis(&self) -> Axis {
        if self.horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Coordinate along the vehicle's own axis (column if horizontal, row if vertical).
    ///
    /// The other coordinate is fixed for the vehicle's lifetime, so this value
    /// alone identifies where the vehicle is.
    pub fn offset(&self) -> u8 {
        if self.horizontal {
            self.col
        } else {
            self.row
        }
    }

    /// Last row covered (inclusive).
    pub fn last_row(&self) -> u8 {
        if self.horizontal {
            self.row
        } else {
            self.row + self.length - 1
        }
    }

    /// Last column covered (inclusive).
    pub fn last_col(&self) -> u8 {
        if self.horizontal {
            self.col + self.length - 1
        } else {
            self.col
        }
    }

    /// Check if the vehicle covers cell `(row, col)`.
    pub fn covers(&self, row: u8, col: u8) -> bool {
        row >= self.row && row <= self.last_row() && col >= self.col && col <= self.last_col()
    }

    /// Iterate over every covered cell, from the anchor outwards.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> {
        let Vehicle {
            row,
            col,
            length,
            horizontal,
            ..
        } = *self;
        (0..length).map(move |i| if horizontal { (row, col + i) } else { (row + i, col) })
    }

    /// Copy of this vehicle moved `delta` cells along its axis.
    ///
    /// No legality checks: callers pass deltas obtained from the movement rules.
    pub fn shifted(&self, delta: i32) -> Self {
        let mut next = *self;
        let moved = (self.offset() as i32 + delta) as u8;
        if self.horizontal {
            next.col = moved;
        } else {
            next.row = moved;
        }
        next
    }
}

/// One committed move: vehicle `index` slid `delta` cells along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slide {
    pub index: usize,
    pub delta: i32,
}
