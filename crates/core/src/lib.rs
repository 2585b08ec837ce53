//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the sliding-block puzzle, the solver and
//! the board generator. It has **no I/O** and no shared state:
//!
//! - **Deterministic**: the same seed produces the same board
//! - **Pure**: every operation takes a board and returns a value; only
//!   [`Board::slide`] mutates, and only by a legal amount
//! - **Synchronous**: generation and solving are CPU-bound calls; callers that
//!   need responsiveness run them on a worker thread
//!
//! # Module Structure
//!
//! - [`board`]: board state, validation and the occupancy grid
//! - [`movement`]: how far a vehicle may slide
//! - [`goal`]: win detection and the trivially-solvable filter
//! - [`solver`]: 0-1 BFS for the fewest obstacle moves
//! - [`generator`]: seeded rejection sampling of playable boards
//! - [`text`]: plain-text board format
//! - [`error`]: placement errors
//!
//! # Rules
//!
//! - Vehicles occupy a straight run of at least two cells and only slide
//!   along their own axis
//! - A slide stops at the grid edge or the first occupied cell
//! - One goal vehicle must reach the exit side, aligned with the middle row
//!   (left/right exits) or middle column (top/bottom exits)
//! - Moving the goal vehicle is free; every slide of any other vehicle counts
//!   as one obstacle move
//!
//! # Example
//!
//! ```
//! use slide_puzzle_core::{generate_playable_board, is_goal_state, minimal_obstacle_moves};
//! use slide_puzzle_core::types::ExitSide;
//!
//! let board = generate_playable_board(6, 6, ExitSide::Right, 42).unwrap();
//! assert!(!is_goal_state(&board));
//! println!("{}", board);
//! println!("needs {:?} obstacle moves", minimal_obstacle_moves(&board));
//! ```

pub mod board;
pub mod error;
pub mod generator;
pub mod goal;
pub mod movement;
pub mod solver;
pub mod text;

pub use slide_puzzle_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Occupancy};
pub use error::PlacementError;
pub use generator::{
    canonical_goal, generate_playable_board, Generation, Generator, GeneratorConfig,
};
pub use goal::{is_goal_state, is_trivially_solvable};
pub use movement::{allowed_delta, allowed_delta_on_axis, reach, Reach};
pub use solver::{minimal_obstacle_moves, SearchLimits, SolveOutcome, SolveStats, Solution, Solver};
