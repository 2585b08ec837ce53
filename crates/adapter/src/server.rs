//! TCP server for the puzzle service
//!
//! One task per connection. Each line is one request and gets exactly one
//! response line. Generation and solving are CPU-bound and run on the blocking
//! pool so a long search never stalls other connections.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::core::{
    allowed_delta_on_axis, is_goal_state, is_trivially_solvable, Generator, GeneratorConfig,
    SearchLimits, Solver,
};
use crate::protocol::*;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Node cap for `solve` requests and for the checks behind `generate`
    /// (`None` = unbounded).
    pub max_expansions: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            max_expansions: None,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("SLIDE_PUZZLE_HOST").unwrap_or(defaults.host);
        let port = env::var("SLIDE_PUZZLE_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let max_expansions = env::var("SLIDE_PUZZLE_MAX_EXPANSIONS")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        Self {
            host,
            port,
            max_expansions,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid socket address {}:{}", self.host, self.port))
    }
}

/// Start the TCP server.
///
/// The bound address is sent on `ready_tx` once the listener is up, which
/// lets callers bind port 0 and learn the real port.
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr).await?;
    let bound = listener.local_addr()?;
    info!(%bound, "puzzle server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let config = Arc::new(config);
    let mut client_id_counter = 0usize;

    loop {
        let (socket, peer) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %peer, "client connected");

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, config).await {
                warn!(client_id, error = %e, "client error");
            }
            info!(client_id, "client disconnected");
        });
    }
}

/// Serve one connection until EOF.
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    config: Arc<ServerConfig>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = handle_line(&config, line).await;
        buf.clear();
        if let Err(e) = serde_json::to_writer(&mut buf, &reply) {
            warn!(client_id, error = %e, "failed to encode reply");
            continue;
        }
        buf.push(b'\n');
        writer.write_all(&buf).await?;
    }

    Ok(())
}

/// Answer one request line.
pub async fn handle_line(config: &ServerConfig, line: &str) -> OutboundMessage {
    let msg = match parse_message(line) {
        Ok(msg) => msg,
        Err(e) => {
            return OutboundMessage::Error(create_error(
                extract_seq(line),
                ErrorCode::InvalidMessage,
                &e.to_string(),
            ))
        }
    };

    match msg {
        ParsedMessage::Generate(req) => {
            debug!(seq = req.seq, rows = req.rows, cols = req.cols, "generate");
            let seq = req.seq;
            let limits = SearchLimits {
                max_expansions: config.max_expansions,
            };
            let task = tokio::task::spawn_blocking(move || {
                let level = req.level.unwrap_or(1).max(1);
                let generator_config = GeneratorConfig {
                    limits,
                    ..GeneratorConfig::for_level(level)
                };
                let mut rng = StdRng::seed_from_u64(req.seed);
                Generator::new(generator_config).generate(
                    req.rows,
                    req.cols,
                    req.exit.into(),
                    &mut rng,
                )
            });
            match task.await {
                Ok(Ok(generation)) => OutboundMessage::Board(create_board(seq, &generation)),
                Ok(Err(err)) => OutboundMessage::Error(create_placement_error(seq, &err)),
                Err(e) => internal_error(seq, &e),
            }
        }
        ParsedMessage::AllowedDelta(req) => match req.board.to_board() {
            Ok(board) => {
                let allowed =
                    allowed_delta_on_axis(&board, req.index, req.axis.into(), req.desired);
                OutboundMessage::Delta(create_delta(req.seq, allowed))
            }
            Err(err) => OutboundMessage::Error(create_placement_error(req.seq, &err)),
        },
        ParsedMessage::IsGoal(req) => match req.board.to_board() {
            Ok(board) => OutboundMessage::Goal(create_goal(
                req.seq,
                is_goal_state(&board),
                is_trivially_solvable(&board),
            )),
            Err(err) => OutboundMessage::Error(create_placement_error(req.seq, &err)),
        },
        ParsedMessage::Solve(req) => {
            let seq = req.seq;
            let board = match req.board.to_board() {
                Ok(board) => board,
                Err(err) => return OutboundMessage::Error(create_placement_error(seq, &err)),
            };
            let limits = SearchLimits {
                max_expansions: req.max_expansions.or(config.max_expansions),
            };
            debug!(seq, ?limits, "solve");
            let task =
                tokio::task::spawn_blocking(move || Solver::new(limits).solve_with_stats(&board));
            match task.await {
                Ok((outcome, stats)) => {
                    OutboundMessage::Solution(create_solution(seq, &outcome, &stats))
                }
                Err(e) => internal_error(seq, &e),
            }
        }
        ParsedMessage::Unknown(msg) => OutboundMessage::Error(create_error(
            msg.seq,
            ErrorCode::UnknownType,
            &format!("unknown message type '{}'", msg.msg_type),
        )),
    }
}

fn internal_error(seq: u64, e: &tokio::task::JoinError) -> OutboundMessage {
    warn!(seq, error = %e, "worker task failed");
    OutboundMessage::Error(create_error(seq, ErrorCode::Internal, "worker task failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_from_env() {
        // This test just ensures it doesn't panic
        let _config = ServerConfig::from_env();
    }

    #[test]
    fn test_default_socket_addr() {
        let addr = ServerConfig::default().socket_addr().unwrap();
        assert_eq!(addr.port(), 7878);
        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(bad.socket_addr().is_err());
    }

    #[tokio::test]
    async fn test_handle_line_reports_bad_json() {
        let reply = handle_line(&ServerConfig::default(), "{nope").await;
        match reply {
            OutboundMessage::Error(err) => {
                assert_eq!(err.code, ErrorCode::InvalidMessage);
                assert_eq!(err.seq, 0);
            }
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handle_line_is_goal() {
        let line = r#"{"type":"is_goal","seq":5,"board":{"rows":6,"cols":6,"exit":"right","vehicles":[{"row":3,"col":4,"length":2,"horizontal":true,"is_goal":true}]}}"#;
        match handle_line(&ServerConfig::default(), line).await {
            OutboundMessage::Goal(goal) => {
                assert_eq!(goal.seq, 5);
                assert!(goal.is_goal);
                assert!(goal.trivially_solvable);
            }
            other => panic!("Expected goal, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handle_line_respects_server_cap() {
        let config = ServerConfig {
            max_expansions: Some(1),
            ..ServerConfig::default()
        };
        let line = r#"{"type":"solve","seq":6,"board":{"rows":6,"cols":6,"exit":"right","vehicles":[{"row":3,"col":0,"length":2,"horizontal":true,"is_goal":true},{"row":2,"col":2,"length":2,"horizontal":false}]}}"#;
        match handle_line(&config, line).await {
            OutboundMessage::Solution(sol) => {
                assert_eq!(sol.status, SolveStatus::LimitReached);
                assert_eq!(sol.obstacle_moves, None);
                assert!(sol.slides.is_empty());
            }
            other => panic!("Expected solution, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_checks_use_server_cap() {
        let config = ServerConfig {
            max_expansions: Some(1),
            ..ServerConfig::default()
        };
        let line = r#"{"type":"generate","seq":7,"rows":12,"cols":12,"exit":"right","seed":2,"level":4000000000}"#;
        match handle_line(&config, line).await {
            OutboundMessage::Board(board) => {
                assert_eq!(board.seq, 7);
                // One expansion never proves a blocked board solvable.
                assert!(!board.verified);
                assert_eq!(board.obstacle_moves, None);
                assert_eq!(board.attempts, 301);
                assert!(board.board.to_board().is_ok());
            }
            other => panic!("Expected board, got {:?}", other),
        }
    }
}
