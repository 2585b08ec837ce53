//! Protocol module - JSON message types for the puzzle service
//!
//! Line-delimited JSON. Every message has `type` and `seq`; responses echo the
//! request's `seq`.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Generation, PlacementError, SolveOutcome, SolveStats};
use crate::types::{Axis, ExitSide, Slide, Vehicle};

// ============== Shared wire types ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitWire {
    Left,
    Right,
    Top,
    Bottom,
}

impl From<ExitSide> for ExitWire {
    fn from(exit: ExitSide) -> Self {
        match exit {
            ExitSide::Left => ExitWire::Left,
            ExitSide::Right => ExitWire::Right,
            ExitSide::Top => ExitWire::Top,
            ExitSide::Bottom => ExitWire::Bottom,
        }
    }
}

impl From<ExitWire> for ExitSide {
    fn from(exit: ExitWire) -> Self {
        match exit {
            ExitWire::Left => ExitSide::Left,
            ExitWire::Right => ExitSide::Right,
            ExitWire::Top => ExitSide::Top,
            ExitWire::Bottom => ExitSide::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisWire {
    Horizontal,
    Vertical,
}

impl From<AxisWire> for Axis {
    fn from(axis: AxisWire) -> Self {
        match axis {
            AxisWire::Horizontal => Axis::Horizontal,
            AxisWire::Vertical => Axis::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleWire {
    pub row: u8,
    pub col: u8,
    pub length: u8,
    pub horizontal: bool,
    #[serde(default)]
    pub is_goal: bool,
}

impl From<&Vehicle> for VehicleWire {
    fn from(v: &Vehicle) -> Self {
        Self {
            row: v.row,
            col: v.col,
            length: v.length,
            horizontal: v.horizontal,
            is_goal: v.is_goal,
        }
    }
}

impl From<VehicleWire> for Vehicle {
    fn from(v: VehicleWire) -> Self {
        Vehicle::new(v.row, v.col, v.length, v.horizontal, v.is_goal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardWire {
    pub rows: usize,
    pub cols: usize,
    pub exit: ExitWire,
    pub vehicles: Vec<VehicleWire>,
}

impl BoardWire {
    pub fn from_board(board: &Board) -> Self {
        Self {
            rows: board.rows() as usize,
            cols: board.cols() as usize,
            exit: board.exit().into(),
            vehicles: board.vehicles().iter().map(VehicleWire::from).collect(),
        }
    }

    /// Validate into a core board.
    pub fn to_board(&self) -> Result<Board, PlacementError> {
        Board::new(
            self.rows,
            self.cols,
            self.exit.into(),
            self.vehicles.iter().copied().map(Vehicle::from).collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideWire {
    pub index: usize,
    pub delta: i32,
}

impl From<&Slide> for SlideWire {
    fn from(s: &Slide) -> Self {
        Self {
            index: s.index,
            delta: s.delta,
        }
    }
}

// ============== Client -> Service Messages ==============

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub seq: u64,
    pub rows: usize,
    pub cols: usize,
    pub exit: ExitWire,
    pub seed: u64,
    #[serde(default)]
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllowedDeltaRequest {
    pub seq: u64,
    pub board: BoardWire,
    pub index: usize,
    pub axis: AxisWire,
    pub desired: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IsGoalRequest {
    pub seq: u64,
    pub board: BoardWire,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolveRequest {
    pub seq: u64,
    pub board: BoardWire,
    /// Overrides the server's default node cap for this request.
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Generate(GenerateRequest),
    AllowedDelta(AllowedDeltaRequest),
    IsGoal(IsGoalRequest),
    Solve(SolveRequest),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
    pub msg_type: String,
}

const KNOWN_TYPES: [&str; 4] = ["generate", "allowed_delta", "is_goal", "solve"];

/// Parse one line.
///
/// An unrecognised `type` is not a parse error; it comes back as
/// [`ParsedMessage::Unknown`] so the caller can answer with its `seq`.
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "generate")]
        Generate(GenerateRequest),
        #[serde(rename = "allowed_delta")]
        AllowedDelta(AllowedDeltaRequest),
        #[serde(rename = "is_goal")]
        IsGoal(IsGoalRequest),
        #[serde(rename = "solve")]
        Solve(SolveRequest),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Generate(m)) => Ok(ParsedMessage::Generate(m)),
        Ok(InboundMessage::AllowedDelta(m)) => Ok(ParsedMessage::AllowedDelta(m)),
        Ok(InboundMessage::IsGoal(m)) => Ok(ParsedMessage::IsGoal(m)),
        Ok(InboundMessage::Solve(m)) => Ok(ParsedMessage::Solve(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct TypeOnly {
                #[serde(rename = "type")]
                msg_type: Option<String>,
            }
            let msg_type = serde_json::from_str::<TypeOnly>(json)?
                .msg_type
                .unwrap_or_else(|| "unknown".to_string());
            if KNOWN_TYPES.contains(&msg_type.as_str()) {
                return Err(e);
            }
            Ok(ParsedMessage::Unknown(UnknownMessage {
                seq: extract_seq(json),
                msg_type,
            }))
        }
    }
}

/// `seq` of a line that may not parse as any message; 0 when absent.
pub fn extract_seq(json: &str) -> u64 {
    #[derive(Debug, Deserialize)]
    struct SeqOnly {
        seq: Option<u64>,
    }
    serde_json::from_str::<SeqOnly>(json)
        .ok()
        .and_then(|s| s.seq)
        .unwrap_or(0)
}

// ============== Service -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardType {
    #[serde(rename = "board")]
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeltaType {
    #[serde(rename = "delta")]
    Delta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalType {
    #[serde(rename = "goal")]
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolutionType {
    #[serde(rename = "solution")]
    Solution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_message")]
    InvalidMessage,
    #[serde(rename = "unknown_type")]
    UnknownType,
    #[serde(rename = "internal")]
    Internal,
    #[serde(rename = "grid_size")]
    GridSize,
    #[serde(rename = "too_many_vehicles")]
    TooManyVehicles,
    #[serde(rename = "vehicle_too_short")]
    VehicleTooShort,
    #[serde(rename = "out_of_bounds")]
    OutOfBounds,
    #[serde(rename = "overlap")]
    Overlap,
    #[serde(rename = "goal_count")]
    GoalCount,
    #[serde(rename = "ragged_rows")]
    RaggedRows,
    #[serde(rename = "bad_shape")]
    BadShape,
}

impl From<&PlacementError> for ErrorCode {
    fn from(err: &PlacementError) -> Self {
        match err {
            PlacementError::GridSize { .. } => ErrorCode::GridSize,
            PlacementError::TooManyVehicles { .. } => ErrorCode::TooManyVehicles,
            PlacementError::VehicleTooShort { .. } => ErrorCode::VehicleTooShort,
            PlacementError::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            PlacementError::Overlap { .. } => ErrorCode::Overlap,
            PlacementError::GoalCount { .. } => ErrorCode::GoalCount,
            PlacementError::RaggedRows { .. } => ErrorCode::RaggedRows,
            PlacementError::BadShape { .. } => ErrorCode::BadShape,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    #[serde(rename = "solved")]
    Solved,
    #[serde(rename = "unsolvable")]
    Unsolvable,
    #[serde(rename = "limit_reached")]
    LimitReached,
}

/// Generated board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardMessage {
    #[serde(rename = "type")]
    pub msg_type: BoardType,
    pub seq: u64,
    #[serde(flatten)]
    pub board: BoardWire,
    pub attempts: u32,
    pub verified: bool,
    pub obstacle_moves: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaMessage {
    #[serde(rename = "type")]
    pub msg_type: DeltaType,
    pub seq: u64,
    pub allowed: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalMessage {
    #[serde(rename = "type")]
    pub msg_type: GoalType,
    pub seq: u64,
    pub is_goal: bool,
    pub trivially_solvable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMessage {
    #[serde(rename = "type")]
    pub msg_type: SolutionType,
    pub seq: u64,
    pub status: SolveStatus,
    pub obstacle_moves: Option<u32>,
    pub slides: Vec<SlideWire>,
    pub expanded: usize,
}

/// Error message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub code: ErrorCode,
    pub message: String,
}

/// Any response line.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Board(BoardMessage),
    Delta(DeltaMessage),
    Goal(GoalMessage),
    Solution(SolutionMessage),
    Error(ErrorMessage),
}

// ============== Utility Functions ==============

pub fn create_board(seq: u64, generation: &Generation) -> BoardMessage {
    BoardMessage {
        msg_type: BoardType::Board,
        seq,
        board: BoardWire::from_board(&generation.board),
        attempts: generation.attempts,
        verified: generation.verified,
        obstacle_moves: generation.obstacle_moves,
    }
}

pub fn create_delta(seq: u64, allowed: i32) -> DeltaMessage {
    DeltaMessage {
        msg_type: DeltaType::Delta,
        seq,
        allowed,
    }
}

pub fn create_goal(seq: u64, is_goal: bool, trivially_solvable: bool) -> GoalMessage {
    GoalMessage {
        msg_type: GoalType::Goal,
        seq,
        is_goal,
        trivially_solvable,
    }
}

pub fn create_solution(seq: u64, outcome: &SolveOutcome, stats: &SolveStats) -> SolutionMessage {
    let status = match outcome {
        SolveOutcome::Solved(_) => SolveStatus::Solved,
        SolveOutcome::Unsolvable => SolveStatus::Unsolvable,
        SolveOutcome::LimitReached { .. } => SolveStatus::LimitReached,
    };
    let slides = outcome
        .solution()
        .map(|s| s.slides.iter().map(SlideWire::from).collect())
        .unwrap_or_default();
    SolutionMessage {
        msg_type: SolutionType::Solution,
        seq,
        status,
        obstacle_moves: outcome.obstacle_moves(),
        slides,
        expanded: stats.expanded,
    }
}

/// Create an error message
pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        code,
        message: message.to_string(),
    }
}

pub fn create_placement_error(seq: u64, err: &PlacementError) -> ErrorMessage {
    create_error(seq, ErrorCode::from(err), &err.to_string())
}
