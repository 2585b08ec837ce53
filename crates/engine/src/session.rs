//! Play session - one level's board, move counters, retry and hints

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::core::{is_goal_state, Board, Generator, GeneratorConfig, PlacementError, Solver};
use crate::types::{Axis, ExitSide, Slide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideError {
    NoSuchVehicle,
    WrongAxis,
    AlreadyWon,
}

impl SlideError {
    pub fn code(self) -> &'static str {
        match self {
            SlideError::NoSuchVehicle | SlideError::WrongAxis => "invalid_slide",
            SlideError::AlreadyWon => "not_playable",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SlideError::NoSuchVehicle => "vehicle index is out of range",
            SlideError::WrongAxis => "vehicle does not slide along the requested axis",
            SlideError::AlreadyWon => "puzzle is already solved",
        }
    }
}

/// One player's run through a level: the starting board, the current board
/// and the move counters.
#[derive(Debug, Clone)]
pub struct Session {
    initial: Board,
    board: Board,
    level: u32,
    verified: bool,
    move_count: u32,
    obstacle_move_count: u32,
    has_won: bool,
}

impl Session {
    /// Start a session on a given board at level 1.
    pub fn new(board: Board) -> Self {
        let has_won = is_goal_state(&board);
        Self {
            initial: board.clone(),
            board,
            level: 1,
            verified: false,
            move_count: 0,
            obstacle_move_count: 0,
            has_won,
        }
    }

    /// Start a session on a freshly generated board for `level`.
    pub fn generate(
        rows: usize,
        cols: usize,
        exit: ExitSide,
        level: u32,
        seed: u64,
    ) -> Result<Self, PlacementError> {
        let level = level.max(1);
        let mut rng = StdRng::seed_from_u64(seed);
        let generation =
            Generator::new(GeneratorConfig::for_level(level)).generate(rows, cols, exit, &mut rng)?;
        debug!(level, attempts = generation.attempts, "level generated");

        let mut session = Self::new(generation.board);
        session.level = level;
        session.verified = generation.verified;
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// False when the board is the generator's unchecked fallback or was
    /// supplied by the caller.
    pub fn verified(&self) -> bool {
        self.verified
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn obstacle_move_count(&self) -> u32 {
        self.obstacle_move_count
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// Slide vehicle `index` up to `desired` cells along `axis`.
    ///
    /// Returns the delta actually applied. Only a non-zero delta counts as a
    /// move.
    pub fn drag(&mut self, index: usize, axis: Axis, desired: i32) -> Result<i32, SlideError> {
        if self.has_won {
            return Err(SlideError::AlreadyWon);
        }
        let Some(vehicle) = self.board.vehicle(index) else {
            return Err(SlideError::NoSuchVehicle);
        };
        if vehicle.axis() != axis {
            return Err(SlideError::WrongAxis);
        }
        let is_goal = vehicle.is_goal;

        let delta = self.board.slide(index, desired);
        if delta != 0 {
            self.move_count += 1;
            if !is_goal {
                self.obstacle_move_count += 1;
            }
            self.has_won = is_goal_state(&self.board);
            if self.has_won {
                info!(
                    level = self.level,
                    moves = self.move_count,
                    obstacle_moves = self.obstacle_move_count,
                    "level cleared"
                );
            }
        }
        Ok(delta)
    }

    /// Put the level back to its starting board and clear the counters.
    pub fn try_again(&mut self) {
        self.board = self.initial.clone();
        self.move_count = 0;
        self.obstacle_move_count = 0;
        self.has_won = is_goal_state(&self.board);
    }

    /// Generate the next level on the same grid and exit side.
    ///
    /// On error the session is left unchanged.
    pub fn advance_level(&mut self, seed: u64) -> Result<(), PlacementError> {
        let next = Self::generate(
            self.initial.rows() as usize,
            self.initial.cols() as usize,
            self.initial.exit(),
            self.level + 1,
            seed,
        )?;
        *self = next;
        Ok(())
    }

    /// First slide of an optimal plan from the current position.
    ///
    /// `None` once won, or when the current position cannot be won.
    pub fn hint(&self) -> Option<Slide> {
        if self.has_won {
            return None;
        }
        Solver::default()
            .solve(&self.board)
            .into_solution()?
            .slides
            .first()
            .copied()
    }
}
