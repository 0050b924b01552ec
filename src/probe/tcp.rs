//! Single TCP reachability probe.

use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time;

/// Why a probe attempt failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Resolution or connect error (refused, unreachable, unknown host).
    #[error("connection error: {0}")]
    Connect(#[from] std::io::Error),

    #[error("connect timed out after {0:?}")]
    Timeout(Duration),
}

/// Attempt one TCP connection to `host:port`.
///
/// The stream is closed as soon as the handshake completes; nothing is sent.
pub async fn probe_once(
    host: &str,
    port: u16,
    connect_timeout: Duration,
) -> Result<(), ProbeError> {
    match time::timeout(connect_timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => Ok(()),
        Ok(Err(e)) => Err(ProbeError::Connect(e)),
        Err(_) => Err(ProbeError::Timeout(connect_timeout)),
    }
}
