//! Play-session engine.
//!
//! Holds the mutable state a front end needs around the pure core: the level's
//! starting board, the live board, move counters, and the win flag. Front ends
//! call [`Session::drag`] for each gesture and never touch the board directly.

pub mod session;

pub use slide_puzzle_core as core;
pub use slide_puzzle_types as types;

pub use session::{Session, SlideError};
