//! Text form of a board
//!
//! One line per row, one character per cell:
//!
//! ```text
//! AA...B
//! .....B
//! ..C..B
//! **C...
//! ..C...
//! ...DDD
//! ```
//!
//! `.` is empty, `*` is the goal vehicle, any other character labels an
//! obstacle. Orientation follows from the shape, since every vehicle is at
//! least two cells long. Printing labels obstacles `A..Z` then `a..z` in
//! vehicle order, so a printed board parses back to the same vehicle order
//! when labels appear in that order.

use std::fmt;

use crate::board::{validate_grid, Board};
use crate::error::PlacementError;
use crate::types::{ExitSide, Vehicle};

const EMPTY: char = '.';
const GOAL: char = '*';
const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

impl Board {
    /// Parse the text form described in the module docs.
    ///
    /// Vehicles are numbered in order of first appearance (row-major scan).
    ///
    /// ```
    /// use slide_puzzle_core::Board;
    /// use slide_puzzle_core::types::ExitSide;
    ///
    /// let board = Board::parse(ExitSide::Right, "
    ///     ......
    ///     ......
    ///     ...A..
    ///     **.A..
    ///     ......
    ///     ......
    /// ").unwrap();
    /// assert_eq!(board.vehicles().len(), 2);
    /// assert!(board.vehicles()[1].is_goal);
    /// assert!(!board.vehicles()[0].horizontal);
    /// ```
    pub fn parse(exit: ExitSide, text: &str) -> Result<Board, PlacementError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let rows = lines.len();
        let cols = lines.first().map(|line| line.chars().count()).unwrap_or(0);
        let (rows, cols) = validate_grid(rows, cols)?;

        // label -> covered cells, in order of first appearance
        let mut groups: Vec<(char, Vec<(u8, u8)>)> = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols as usize {
                return Err(PlacementError::RaggedRows { line: row });
            }
            for (col, ch) in line.chars().enumerate() {
                if ch == EMPTY {
                    continue;
                }
                let cell = (row as u8, col as u8);
                match groups.iter_mut().find(|(label, _)| *label == ch) {
                    Some((_, cells)) => cells.push(cell),
                    None => groups.push((ch, vec![cell])),
                }
            }
        }

        let mut vehicles = Vec::with_capacity(groups.len());
        for (index, (label, cells)) in groups.iter().enumerate() {
            vehicles.push(vehicle_from_cells(index, *label, cells)?);
        }

        Board::new(rows as usize, cols as usize, exit, vehicles)
    }
}

/// Turn a row-major sorted cell list into a vehicle.
fn vehicle_from_cells(
    index: usize,
    label: char,
    cells: &[(u8, u8)],
) -> Result<Vehicle, PlacementError> {
    let (row, col) = cells[0];
    if cells.len() < 2 {
        return Err(PlacementError::VehicleTooShort {
            index,
            length: cells.len() as u8,
        });
    }

    let horizontal = cells
        .iter()
        .enumerate()
        .all(|(i, &(r, c))| r == row && c as usize == col as usize + i);
    let vertical = cells
        .iter()
        .enumerate()
        .all(|(i, &(r, c))| c == col && r as usize == row as usize + i);
    if !horizontal && !vertical {
        return Err(PlacementError::BadShape { label });
    }

    Ok(Vehicle::new(
        row,
        col,
        cells.len() as u8,
        horizontal,
        label == GOAL,
    ))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows() as usize;
        let cols = self.cols() as usize;
        let mut cells = vec![EMPTY; rows * cols];

        let mut obstacle = 0usize;
        for vehicle in self.vehicles() {
            let label = if vehicle.is_goal {
                GOAL
            } else {
                let label = LABELS[obstacle % LABELS.len()] as char;
                obstacle += 1;
                label
            };
            for (row, col) in vehicle.cells() {
                cells[row as usize * cols + col as usize] = label;
            }
        }

        for row in cells.chunks(cols) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_then_print_is_stable() {
        let text = "\
AA...B
.....B
..C..B
**C...
..C...
...DDD
";
        let board = Board::parse(ExitSide::Right, text).unwrap();
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 6);
        assert_eq!(board.vehicles().len(), 5);
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn parse_rejects_bent_vehicle() {
        let err = Board::parse(ExitSide::Right, "AA.\n.A.\n**.").unwrap_err();
        assert_eq!(err, PlacementError::BadShape { label: 'A' });
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Board::parse(ExitSide::Right, "...\n**\n...").unwrap_err();
        assert_eq!(err, PlacementError::RaggedRows { line: 1 });
    }

    #[test]
    fn parse_rejects_single_cell_vehicle() {
        let err = Board::parse(ExitSide::Right, "A..\n**.\n...").unwrap_err();
        assert_eq!(
            err,
            PlacementError::VehicleTooShort {
                index: 0,
                length: 1
            }
        );
    }

    #[test]
    fn parse_rejects_split_label() {
        let err = Board::parse(ExitSide::Right, "A.A\n**.\n...").unwrap_err();
        assert_eq!(err, PlacementError::BadShape { label: 'A' });
    }
}
