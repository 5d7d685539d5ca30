//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use finance_query::config::AppConfig;
use finance_query::http::HttpServer;
use finance_query::lifecycle::Shutdown;

/// Start a mock upstream on an ephemeral port, returning a fixed JSON body.
pub async fn start_mock_upstream(body: &'static str) -> SocketAddr {
    start_programmable_upstream(move || async move { (200, body.to_string()) }).await
}

/// Start a programmable mock upstream on an ephemeral port.
#[allow(dead_code)]
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Consume the request head before answering.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Config pointed at the given mock upstream.
#[allow(dead_code)]
pub fn test_config(upstream: SocketAddr) -> AppConfig {
    let mut config = AppConfig::default();
    config.upstream.base_url = format!("http://{upstream}");
    config
}

/// Spawn the API server on an ephemeral port.
///
/// Returns the bound address and the shutdown handle; trigger it at the end
/// of the test so the server drains and releases the shared session.
#[allow(dead_code)]
pub async fn start_api_server(config: AppConfig) -> (SocketAddr, Arc<Shutdown>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config);
    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    // Give the server a beat to start accepting.
    tokio::time::sleep(Duration::from_millis(200)).await;

    (addr, shutdown)
}
