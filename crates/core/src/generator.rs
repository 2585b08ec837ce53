//! Board generator - seeded rejection sampling
//!
//! A candidate board is the goal vehicle at its canonical start followed by a
//! batch of randomly drawn obstacles. Candidates that are trivially solvable,
//! unsolvable, or too easy are thrown away. After
//! [`MAX_GENERATION_ATTEMPTS`] rejections one more candidate is drawn and
//! returned unchecked.
//!
//! All randomness comes from the caller's [`Rng`], so a seeded generator
//! reproduces the same board for the same parameters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument, warn};

use crate::board::{validate_grid, Board, Occupancy};
use crate::error::PlacementError;
use crate::goal::is_trivially_solvable;
use crate::solver::{SearchLimits, Solver};
use crate::types::{
    ExitSide, Vehicle, CELLS_PER_OBSTACLE, GOAL_VEHICLE_LENGTH, MAX_GENERATION_ATTEMPTS,
    MAX_VEHICLES, MIN_OBSTACLE_TARGET, OBSTACLE_LENGTHS,
};

/// Obstacles that fit beside the goal vehicle.
const MAX_OBSTACLES: usize = MAX_VEHICLES - 1;

/// Difficulty knobs for one generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Candidates checked before falling back to an unchecked board.
    pub max_attempts: u32,
    /// Obstacle draws per candidate (`None` = scale with grid area).
    pub obstacle_target: Option<usize>,
    /// Obstacle draws added on top of the target.
    pub extra_obstacles: usize,
    /// Fewest obstacle moves an accepted board must need.
    pub min_obstacle_moves: u32,
    /// Budget for each verification search.
    pub limits: SearchLimits,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_GENERATION_ATTEMPTS,
            obstacle_target: None,
            extra_obstacles: 0,
            min_obstacle_moves: 1,
            limits: SearchLimits::UNLIMITED,
        }
    }
}

impl GeneratorConfig {
    /// Config for a 1-based level.
    ///
    /// Every four levels the minimum obstacle moves goes up by one (up to 3)
    /// and every two levels one more obstacle is drawn, up to a board's
    /// vehicle capacity.
    ///
    /// ```
    /// use slide_puzzle_core::GeneratorConfig;
    ///
    /// assert_eq!(GeneratorConfig::for_level(1).min_obstacle_moves, 1);
    /// assert_eq!(GeneratorConfig::for_level(5).min_obstacle_moves, 2);
    /// assert_eq!(GeneratorConfig::for_level(40).min_obstacle_moves, 3);
    /// assert_eq!(GeneratorConfig::for_level(5).extra_obstacles, 2);
    /// assert_eq!(GeneratorConfig::for_level(u32::MAX).extra_obstacles, 47);
    /// ```
    pub fn for_level(level: u32) -> Self {
        let step = level.saturating_sub(1);
        Self {
            min_obstacle_moves: (1 + step / 4).min(3),
            extra_obstacles: ((step / 2) as usize).min(MAX_OBSTACLES),
            ..Self::default()
        }
    }

    /// Obstacle draws for a `rows` x `cols` grid, never more than a board
    /// can hold.
    pub fn obstacle_count(&self, rows: u8, cols: u8) -> usize {
        let base = self.obstacle_target.unwrap_or_else(|| {
            let area = rows as usize * cols as usize;
            MIN_OBSTACLE_TARGET.max(area / CELLS_PER_OBSTACLE)
        });
        base.saturating_add(self.extra_obstacles).min(MAX_OBSTACLES)
    }
}

/// A generated board and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub board: Board,
    /// Candidates drawn, including the returned one.
    pub attempts: u32,
    /// Verified minimum obstacle moves; `None` for the unchecked fallback.
    pub obstacle_moves: Option<u32>,
    /// False when every attempt was rejected and `board` is unchecked.
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draw candidates until one passes or the attempt budget runs out.
    #[instrument(level = "debug", skip(self, rng))]
    pub fn generate<R: Rng>(
        &self,
        rows: usize,
        cols: usize,
        exit: ExitSide,
        rng: &mut R,
    ) -> Result<Generation, PlacementError> {
        let (rows, cols) = validate_grid(rows, cols)?;
        let solver = Solver::new(self.config.limits);
        let target = self.config.obstacle_count(rows, cols);

        for attempt in 1..=self.config.max_attempts {
            let board = random_board(rows, cols, exit, target, rng);
            if is_trivially_solvable(&board) {
                continue;
            }
            let Some(moves) = solver.solve(&board).obstacle_moves() else {
                continue;
            };
            if moves >= self.config.min_obstacle_moves {
                debug!(attempt, obstacle_moves = moves, "accepted board");
                return Ok(Generation {
                    board,
                    attempts: attempt,
                    obstacle_moves: Some(moves),
                    verified: true,
                });
            }
        }

        warn!(
            attempts = self.config.max_attempts,
            "no candidate passed, returning unchecked board"
        );
        Ok(Generation {
            board: random_board(rows, cols, exit, target, rng),
            attempts: self.config.max_attempts.saturating_add(1),
            obstacle_moves: None,
            verified: false,
        })
    }
}

/// Generate a playable board from a seed with the default config.
///
/// The same arguments always produce the same board.
///
/// ```
/// use slide_puzzle_core::generator::generate_playable_board;
/// use slide_puzzle_core::types::ExitSide;
///
/// let a = generate_playable_board(6, 6, ExitSide::Right, 7).unwrap();
/// let b = generate_playable_board(6, 6, ExitSide::Right, 7).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn generate_playable_board(
    rows: usize,
    cols: usize,
    exit: ExitSide,
    seed: u64,
) -> Result<Board, PlacementError> {
    let mut rng = StdRng::seed_from_u64(seed);
    Generator::default()
        .generate(rows, cols, exit, &mut rng)
        .map(|generation| generation.board)
}

/// Canonical start of the goal vehicle: on the exit lane, at the far end.
pub fn canonical_goal(rows: u8, cols: u8, exit: ExitSide) -> Vehicle {
    let lane = exit.lane(rows, cols);
    let len = GOAL_VEHICLE_LENGTH;
    match exit {
        ExitSide::Right => Vehicle::goal(lane, 0, len, true),
        ExitSide::Left => Vehicle::goal(lane, cols - len, len, true),
        ExitSide::Top => Vehicle::goal(rows - len, lane, len, false),
        ExitSide::Bottom => Vehicle::goal(0, lane, len, false),
    }
}

/// One candidate: the goal first, then `target` obstacle draws.
///
/// A draw that overlaps or does not fit is dropped, not redrawn. Drawing
/// stops early once the board is at vehicle capacity.
fn random_board<R: Rng>(
    rows: u8,
    cols: u8,
    exit: ExitSide,
    target: usize,
    rng: &mut R,
) -> Board {
    let mut grid = Occupancy::new(rows, cols);
    let goal = canonical_goal(rows, cols, exit);
    grid.mark(&goal);
    let mut vehicles = vec![goal];

    for _ in 0..target {
        if vehicles.len() == MAX_VEHICLES {
            break;
        }
        let length = OBSTACLE_LENGTHS[rng.random_range(0..OBSTACLE_LENGTHS.len())];
        let horizontal = rng.random_bool(0.5);
        let (span_rows, span_cols) = if horizontal {
            (rows, cols.saturating_sub(length - 1))
        } else {
            (rows.saturating_sub(length - 1), cols)
        };
        if span_rows == 0 || span_cols == 0 {
            continue;
        }
        let row = rng.random_range(0..span_rows);
        let col = rng.random_range(0..span_cols);
        let candidate = Vehicle::obstacle(row, col, length, horizontal);

        if grid.fits(&candidate) {
            grid.mark(&candidate);
            vehicles.push(candidate);
        }
    }

    Board::from_parts(rows, cols, exit, vehicles)
}
