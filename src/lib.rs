//! Sliding-block puzzle engine (workspace facade crate).
//!
//! Re-exports the workspace crates under one name:
//! `slide_puzzle::{types, core, engine, adapter}`.

pub use slide_puzzle_adapter as adapter;
pub use slide_puzzle_core as core;
pub use slide_puzzle_engine as engine;
pub use slide_puzzle_types as types;
