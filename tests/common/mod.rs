#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use hearth::access_log::AccessLog;
use hearth::files::DocumentRoot;
use hearth::server::ServerState;
use tempfile::TempDir;

/// A throwaway document root plus an access log next to it.
pub struct Site {
    pub dir: TempDir,
    pub server: Arc<ServerState>,
}

impl Site {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("html")).unwrap();

        let server = Arc::new(ServerState::new(
            DocumentRoot::new(dir.path().join("html"), "404.html"),
            AccessLog::new(dir.path().join("server.log")),
        ));

        Self { dir, server }
    }

    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) {
        let path = self.dir.path().join("html").join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn log_path(&self) -> &Path {
        self.server.access_log.path()
    }

    /// Access log lines with the `[timestamp] ` prefix removed.
    pub fn log_lines(&self) -> Vec<String> {
        match std::fs::read_to_string(self.log_path()) {
            Ok(text) => text
                .lines()
                .map(|line| {
                    let (_, rest) = line.split_once("] ").expect("timestamp prefix");
                    rest.to_string()
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// A raw response split at the blank line.
pub struct RawResponse {
    pub head: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn parse(bytes: &[u8]) -> Self {
        let split = bytes
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("header terminator");

        Self {
            head: String::from_utf8(bytes[..split].to_vec()).unwrap(),
            body: bytes[split + 4..].to_vec(),
        }
    }

    pub fn status_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}
