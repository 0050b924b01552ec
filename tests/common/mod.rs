//! Shared utilities for end-to-end tests of the gate binary.

use std::net::TcpListener;
use std::path::Path;
use std::process::Command;

/// A dependency stand-in: accepts connections into its backlog until dropped.
#[allow(dead_code)]
pub struct MockService {
    pub listener: TcpListener,
    pub port: u16,
}

pub fn start_mock_service() -> MockService {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    MockService { listener, port }
}

/// A port nothing is listening on.
pub fn closed_port() -> u16 {
    start_mock_service().port
}

/// The gate binary with a clean environment pointing at the given ports.
pub fn gate(db_port: u16, cache_port: u16, migration: &str, workdir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ready-gate"));
    cmd.env_clear()
        .env("PATH", std::env::var("PATH").unwrap_or_default())
        .env("DB_HOST", "127.0.0.1")
        .env("DB_PORT", db_port.to_string())
        .env("REDIS_HOST", "127.0.0.1")
        .env("REDIS_PORT", cache_port.to_string())
        .env("WAIT_TIMEOUT", "5")
        .env("MIGRATION_COMMAND", migration)
        .current_dir(workdir);
    cmd
}
