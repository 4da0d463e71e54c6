//! Append-only request log shared by every connection.
//!
//! Each record is one line:
//!
//! ```text
//! [2024-05-01 13:37:00] 127.0.0.1 "GET /index.html" 200
//! ```
//!
//! Writers serialize through a single mutex held for one
//! open-append-close cycle, never across network I/O.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub client_ip: String,
    pub method: String,
    pub path: String,
    pub status: u16,
}

impl LogEntry {
    /// Creates an entry stamped with the current local time.
    pub fn new(
        client_ip: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        status: u16,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            client_ip: client_ip.into(),
            method: method.into(),
            path: path.into(),
            status,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} \"{} {}\" {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.client_ip,
            self.method,
            self.path,
            self.status
        )
    }
}

#[derive(Debug)]
pub struct AccessLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AccessLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line for a finished request.
    pub async fn record(&self, client_ip: &str, method: &str, path: &str, status: u16) {
        self.append(&LogEntry::new(client_ip, method, path, status)).await;
    }

    /// Appends `entry` to the sink.
    ///
    /// A sink that cannot be opened or written loses this entry; the failure
    /// goes to the operator through `tracing` and is never retried.
    pub async fn append(&self, entry: &LogEntry) {
        let line = format!("{entry}\n");
        let _guard = self.lock.lock().await;

        let mut file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("log file open failed: {}: {}", self.path.display(), e);
                return;
            }
        };

        let written = async {
            file.write_all(line.as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            tracing::error!("log write failed: {}: {}", self.path.display(), e);
        }
    }
}
