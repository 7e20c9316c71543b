//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use uptime_board::board::Board;
use uptime_board::config::{BoardConfig, ServiceConfig};
use uptime_board::notify::{Notifier, NotifyError};

/// Read until the end of the request headers so closing never resets the peer.
async fn drain_request(socket: &mut TcpStream) {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    return;
                }
            }
        }
    }
}

/// Start a programmable backend on an ephemeral port.
///
/// `f` decides each response's status and body; it may sleep to simulate a slow service.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
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
                        drain_request(&mut socket).await;
                        let (status, body) = f().await;
                        let response = format!(
                            "HTTP/1.1 {} Status\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Backend that always answers with `status`.
#[allow(dead_code)]
pub async fn start_status_backend(status: u16) -> SocketAddr {
    start_programmable_backend(move || async move { (status, "ok".to_string()) }).await
}

/// Backend that answers 200 after `delay`.
#[allow(dead_code)]
pub async fn start_slow_backend(delay: Duration) -> SocketAddr {
    start_programmable_backend(move || async move {
        tokio::time::sleep(delay).await;
        (200, "slow".to_string())
    })
    .await
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

#[allow(dead_code)]
pub fn service(name: &str, env: &str, addr: SocketAddr) -> ServiceConfig {
    ServiceConfig {
        name: name.into(),
        url: format!("http://{addr}/health"),
        env: env.into(),
    }
}

#[allow(dead_code)]
pub fn config(services: Vec<ServiceConfig>) -> BoardConfig {
    BoardConfig {
        interval_seconds: 60,
        timeout_ms: 500,
        concurrency: 2,
        services,
        ..BoardConfig::default()
    }
}

/// Notifier that records everything it is asked to deliver.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub boards: Arc<Mutex<Vec<Board>>>,
    pub alerts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn boards(&self) -> Vec<Board> {
        self.boards.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn upsert_board(&self, board: &Board) -> Result<(), NotifyError> {
        self.boards.lock().unwrap().push(board.clone());
        Ok(())
    }

    async fn post_alert(&self, text: &str) -> Result<(), NotifyError> {
        self.alerts.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Notifier whose every delivery fails.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    async fn upsert_board(&self, _board: &Board) -> Result<(), NotifyError> {
        Err(NotifyError::NoBoard)
    }

    async fn post_alert(&self, _text: &str) -> Result<(), NotifyError> {
        Err(NotifyError::NoBoard)
    }
}
