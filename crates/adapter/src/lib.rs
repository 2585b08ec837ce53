//! Adapter module - puzzle service over TCP with a JSON protocol
//!
//! Exposes the core operations to external clients (front ends, bots, test
//! harnesses) without linking against Rust.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP. Each
//! request is one object on one line with a `type` and a `seq`; the server
//! answers each request with exactly one line echoing that `seq`. There is no
//! session state: every request carries the full board.
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **generate**: seeded playable board for a grid, exit side and optional level
//! - **allowed_delta**: how far one vehicle may slide
//! - **is_goal**: win check plus the trivially-solvable check
//! - **solve**: fewest obstacle moves and one optimal slide sequence
//!
//! ## Server → Client
//!
//! - **board**, **delta**, **goal**, **solution**: the matching responses
//! - **error**: error response with code and message
//!
//! # Environment Variables
//!
//! - `SLIDE_PUZZLE_HOST`: Bind address (default: "127.0.0.1")
//! - `SLIDE_PUZZLE_PORT`: Port number (default: 7878)
//! - `SLIDE_PUZZLE_MAX_EXPANSIONS`: Default node cap for `solve` (default: unbounded)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"generate","seq":1,"rows":6,"cols":6,"exit":"right","seed":42}
//! Server -> Client: {"type":"board","seq":1,"rows":6,"cols":6,"exit":"right","vehicles":[...],"attempts":3,"verified":true,"obstacle_moves":2}
//! Client -> Server: {"type":"solve","seq":2,"board":{"rows":6,"cols":6,"exit":"right","vehicles":[...]}}
//! Server -> Client: {"type":"solution","seq":2,"status":"solved","obstacle_moves":2,"slides":[...],"expanded":310}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"generate","seq":1,"rows":6,"cols":6,"exit":"right","seed":7}
//! ```

pub mod protocol;
pub mod server;

pub use slide_puzzle_core as core;
pub use slide_puzzle_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use server::{handle_line, run_server, ServerConfig};
