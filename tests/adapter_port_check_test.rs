use std::net::TcpListener;
use std::time::Duration;

use slide_puzzle::adapter::server::{run_server, ServerConfig};

#[tokio::test]
async fn adapter_fails_when_port_in_use() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral port");
    let port = listener.local_addr().unwrap().port();

    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
        max_expansions: None,
    };
    let result = tokio::time::timeout(Duration::from_secs(2), run_server(config, None))
        .await
        .expect("bind failure should return immediately");
    assert!(result.is_err());
    drop(listener);
}

#[test]
fn adapter_rejects_unparseable_host() {
    let config = ServerConfig {
        host: "no such host".to_string(),
        ..ServerConfig::default()
    };
    assert!(config.socket_addr().is_err());
}
