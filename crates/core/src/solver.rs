//! State-space solver - fewest obstacle moves before the goal vehicle can exit
//!
//! The search runs a 0-1 breadth-first search over board states. Nodes are
//! arrangements of the vehicles; edges are single slides of one vehicle to any
//! stopping position within its reach (every intermediate cell is its own
//! neighbour, since the cheapest plan may stop a vehicle short). Sliding the
//! goal vehicle costs 0, sliding any other vehicle costs 1, so the distance to
//! the first won state is the minimum number of obstacle moves.
//!
//! # Algorithm
//!
//! 1. Seed a deque with the starting board at cost 0.
//! 2. Pop from the front. Skip stale entries whose recorded cost has since improved.
//! 3. If the state is won, return its cost (0-1 BFS pops states in cost order).
//! 4. Otherwise relax every neighbour: 0-cost edges go to the front of the
//!    deque, 1-cost edges to the back. A neighbour already reached with a lower
//!    or equal cost is ignored.
//!
//! States are identified by each vehicle's coordinate along its own axis, so
//! the key is one byte per vehicle.
//!
//! # Limits
//!
//! The base search is unbounded. It is meant for small boards (6x6 with a
//! dozen or so vehicles). [`SearchLimits::max_expansions`] caps the number of
//! expanded states for callers that need a budget.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use crate::board::Board;
use crate::goal::is_goal_state;
use crate::movement::reach_in;
use crate::types::{Slide, Vehicle, MAX_VEHICLES};

type StateKey = ArrayVec<u8, MAX_VEHICLES>;

fn state_key(vehicles: &[Vehicle]) -> StateKey {
    vehicles.iter().map(Vehicle::offset).collect()
}

/// Budget for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Stop after expanding this many states (`None` = unbounded).
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub const UNLIMITED: Self = Self {
        max_expansions: None,
    };

    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions: Some(max_expansions),
        }
    }
}

/// An optimal plan: the slides to play, in order, ending in a won state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Number of slides of non-goal vehicles in `slides`.
    pub obstacle_moves: u32,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(Solution),
    /// Every reachable state was explored and none is won.
    Unsolvable,
    /// The expansion budget ran out first.
    LimitReached { expanded: usize },
}

impl SolveOutcome {
    /// Minimal obstacle moves, if a solution was found.
    pub fn obstacle_moves(&self) -> Option<u32> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution.obstacle_moves),
            SolveOutcome::Unsolvable | SolveOutcome::LimitReached { .. } => None,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolveOutcome::Solved(_) => "solved",
            SolveOutcome::Unsolvable => "unsolvable",
            SolveOutcome::LimitReached { .. } => "limit_reached",
        }
    }
}

/// Counters from one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolveStats {
    /// States taken off the deque and expanded.
    pub expanded: usize,
    /// Neighbour states produced (including already-known ones).
    pub generated: usize,
    /// Distinct states recorded.
    pub distinct: usize,
}

struct Node {
    key: StateKey,
    cost: u32,
    /// Predecessor and the slide that led here along the cheapest known path.
    parent: Option<(usize, Slide)>,
}

/// 0-1 BFS solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    limits: SearchLimits,
}

impl Solver {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Search from `board`; the caller's board is never modified.
    pub fn solve(&self, board: &Board) -> SolveOutcome {
        self.solve_with_stats(board).0
    }

    #[instrument(level = "debug", skip_all, fields(vehicles = board.vehicles().len()))]
    pub fn solve_with_stats(&self, board: &Board) -> (SolveOutcome, SolveStats) {
        let mut stats = SolveStats::default();
        let start = state_key(board.vehicles());
        let mut known: FxHashMap<StateKey, usize> = FxHashMap::default();
        known.insert(start.clone(), 0);
        let mut nodes = vec![Node {
            key: start,
            cost: 0,
            parent: None,
        }];

        let mut queue: VecDeque<(usize, u32)> = VecDeque::new();
        queue.push_back((0, 0));

        // One board reused for every expansion; nodes only keep their key.
        let mut scratch = board.clone();
        let mut next_states = Vec::new();

        while let Some((id, cost)) = queue.pop_front() {
            if cost > nodes[id].cost {
                continue;
            }

            scratch.restore(&nodes[id].key);
            if is_goal_state(&scratch) {
                stats.distinct = nodes.len();
                let solution = reconstruct(&nodes, id);
                debug!(
                    obstacle_moves = solution.obstacle_moves,
                    expanded = stats.expanded,
                    distinct = stats.distinct,
                    "solved"
                );
                return (SolveOutcome::Solved(solution), stats);
            }

            if let Some(max) = self.limits.max_expansions {
                if stats.expanded >= max {
                    stats.distinct = nodes.len();
                    debug!(expanded = stats.expanded, "expansion limit reached");
                    return (
                        SolveOutcome::LimitReached {
                            expanded: stats.expanded,
                        },
                        stats,
                    );
                }
            }
            stats.expanded += 1;

            neighbors(&scratch, &nodes[id].key, &mut next_states);
            for (slide, key) in next_states.drain(..) {
                stats.generated += 1;
                let weight = if scratch.vehicles()[slide.index].is_goal {
                    0
                } else {
                    1
                };
                let next_cost = cost + weight;

                let target = match known.get(&key) {
                    Some(&existing) if nodes[existing].cost <= next_cost => continue,
                    Some(&existing) => {
                        nodes[existing].cost = next_cost;
                        nodes[existing].parent = Some((id, slide));
                        existing
                    }
                    None => {
                        let fresh = nodes.len();
                        known.insert(key.clone(), fresh);
                        nodes.push(Node {
                            key,
                            cost: next_cost,
                            parent: Some((id, slide)),
                        });
                        fresh
                    }
                };

                if weight == 0 {
                    queue.push_front((target, next_cost));
                } else {
                    queue.push_back((target, next_cost));
                }
            }
        }

        stats.distinct = nodes.len();
        debug!(expanded = stats.expanded, distinct = stats.distinct, "no solution");
        (SolveOutcome::Unsolvable, stats)
    }
}

/// Every state one slide away from `board` (whose key is `key`), with the
/// slide that produces it. `out` is cleared first.
fn neighbors(board: &Board, key: &StateKey, out: &mut Vec<(Slide, StateKey)>) {
    out.clear();
    for (index, vehicle) in board.vehicles().iter().enumerate() {
        let grid = board.occupancy(Some(index));
        let reach = reach_in(&grid, vehicle);
        for delta in (1..=reach.forward).chain(reach.backward..=-1) {
            let mut next = key.clone();
            next[index] = (key[index] as i32 + delta) as u8;
            out.push((Slide { index, delta }, next));
        }
    }
}

fn reconstruct(nodes: &[Node], goal: usize) -> Solution {
    let mut slides = Vec::new();
    let mut at = goal;
    while let Some((parent, slide)) = nodes[at].parent {
        slides.push(slide);
        at = parent;
    }
    slides.reverse();
    Solution {
        obstacle_moves: nodes[goal].cost,
        slides,
    }
}

/// Fewest non-goal moves needed before the board can be won.
///
/// `Some(0)` means the goal vehicle can reach the exit on its own; `None`
/// means no reachable state is won.
///
/// ```
/// use slide_puzzle_core::{solver::minimal_obstacle_moves, Board};
/// use slide_puzzle_core::types::ExitSide;
///
/// let board = Board::parse(ExitSide::Right, "
///     ......
///     ......
///     ......
///     **.A..
///     ...A..
///     ......
/// ").unwrap();
/// assert_eq!(minimal_obstacle_moves(&board), Some(1));
/// ```
pub fn minimal_obstacle_moves(board: &Board) -> Option<u32> {
    Solver::default().solve(board).obstacle_moves()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::is_trivially_solvable;
    use crate::types::ExitSide;

    fn parse(text: &str) -> Board {
        Board::parse(ExitSide::Right, text).unwrap()
    }

    fn replay(board: &Board, solution: &Solution) -> Board {
        let mut board = board.clone();
        for slide in &solution.slides {
            assert_eq!(board.slide(slide.index, slide.delta), slide.delta);
        }
        board
    }

    #[test]
    fn solver_keeps_its_limits() {
        let limits = SearchLimits::with_max_expansions(25);
        assert_eq!(Solver::new(limits).limits(), limits);
        assert_eq!(Solver::default().limits(), SearchLimits::UNLIMITED);
    }

    #[test]
    fn unsolvable_search_records_each_arrangement_once() {
        // The goal and A share one free cell: (goal, A) columns can only be
        // (0, 2), (0, 3) or (1, 3).
        let board = parse(
            "
            ......
            ......
            ......
            **.AAA
            ......
            ......
            ",
        );
        let (outcome, stats) = Solver::default().solve_with_stats(&board);
        assert_eq!(outcome, SolveOutcome::Unsolvable);
        assert_eq!(stats.distinct, 3);
        assert_eq!(stats.expanded, 3);
    }

    #[test]
    fn already_won_costs_nothing() {
        let board = parse(
            "
            ......
            ......
            ......
            ....**
            ......
            ......
            ",
        );
        let outcome = Solver::default().solve(&board);
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.obstacle_moves, 0);
        assert!(solution.slides.is_empty());
    }

    #[test]
    fn clear_lane_needs_only_goal_moves() {
        let board = parse(
            "
            ......
            ......
            ......
            **....
            ......
            ......
            ",
        );
        assert!(is_trivially_solvable(&board));
        let solution = Solver::default().solve(&board).into_solution().unwrap();
        assert_eq!(solution.obstacle_moves, 0);
        assert!(is_goal_state(&replay(&board, &solution)));
    }

    #[test]
    fn horizontal_blocker_in_lane_is_unsolvable() {
        let board = parse(
            "
            ......
            ......
            ......
            **.AAA
            ......
            ......
            ",
        );
        let (outcome, stats) = Solver::default().solve_with_stats(&board);
        assert_eq!(outcome, SolveOutcome::Unsolvable);
        assert!(stats.expanded > 0);
        assert_eq!(minimal_obstacle_moves(&board), None);
    }

    #[test]
    fn blocker_pinned_by_edge_and_neighbour_is_unsolvable() {
        let board = parse(
            "
            ...A..
            ...A..
            ...A..
            **.C..
            ...C..
            ...C..
            ",
        );
        assert_eq!(minimal_obstacle_moves(&board), None);
    }

    #[test]
    fn chain_of_blockers_counts_each_move() {
        // A needs two cells either way; B and D each block one side.
        let board = parse(
            "
            ......
            ..BB..
            ...A..
            **.A..
            ..DDD.
            ......
            ",
        );
        let solution = Solver::default().solve(&board).into_solution().unwrap();
        assert_eq!(solution.obstacle_moves, 2);
        assert!(is_goal_state(&replay(&board, &solution)));
    }

    #[test]
    fn goal_moves_are_free_but_obstacle_moves_count() {
        // A blocks the lane and can escape by moving up 2 or down 1.
        let board = parse(
            "
            ......
            ......
            ..A...
            **A...
            ......
            ......
            ",
        );
        let solution = Solver::default().solve(&board).into_solution().unwrap();
        assert_eq!(solution.obstacle_moves, 1);
        let obstacle_slides = solution
            .slides
            .iter()
            .filter(|s| !board.vehicles()[s.index].is_goal)
            .count();
        assert_eq!(obstacle_slides, 1);
        assert!(is_goal_state(&replay(&board, &solution)));
    }

    #[test]
    fn expansion_limit_is_reported() {
        let board = parse(
            "
            ......
            ......
            ..A...
            **A...
            ......
            ......
            ",
        );
        let solver = Solver::new(SearchLimits::with_max_expansions(1));
        let (outcome, stats) = solver.solve_with_stats(&board);
        assert_eq!(outcome, SolveOutcome::LimitReached { expanded: 1 });
        assert_eq!(stats.expanded, 1);
        assert_eq!(outcome.obstacle_moves(), None);
    }

    #[test]
    fn search_does_not_touch_input() {
        let board = parse(
            "
            ......
            ......
            ..A...
            **A...
            ......
            ......
            ",
        );
        let before = board.clone();
        let _ = Solver::default().solve(&board);
        assert_eq!(board, before);
    }
}
