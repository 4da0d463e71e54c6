//! Connection acceptance and the state shared by every connection.

pub mod listener;

use crate::access_log::AccessLog;
use crate::config::Config;
use crate::files::DocumentRoot;

/// Process-wide state created once at startup and handed to every
/// connection through an `Arc`.
///
/// The access log is the only mutable part; the document root is read-only.
#[derive(Debug)]
pub struct ServerState {
    pub files: DocumentRoot,
    pub access_log: AccessLog,
}

impl ServerState {
    pub fn new(files: DocumentRoot, access_log: AccessLog) -> Self {
        Self { files, access_log }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            DocumentRoot::from_config(&cfg.static_files),
            AccessLog::new(cfg.log.path.clone()),
        )
    }
}
