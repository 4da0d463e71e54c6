use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, warn};

use crate::config::{Config, ServerConfig};
use crate::http::connection::Connection;
use crate::server::ServerState;

/// Creates, binds and listens the server socket with the configured backlog.
///
/// Every failure here is fatal to the process.
pub fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = cfg
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address {}", cfg.listen_addr))?;

    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    }
    .context("socket failed")?;

    socket.set_reuseaddr(true).context("socket failed")?;
    socket
        .bind(addr)
        .with_context(|| format!("bind failed on {addr}"))?;

    socket.listen(cfg.backlog).context("listen failed")
}

/// Accepts connections forever, one detached task each.
///
/// Accept errors are reported and skipped.
pub async fn serve(listener: TcpListener, server: Arc<ServerState>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("accept failed: {}", e);
                continue;
            }
        };
        info!("Client connected: {}", peer.ip());

        let server = Arc::clone(&server);
        tokio::spawn(async move {
            let conn = Connection::new(socket, peer.ip(), server);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.server)?;
    info!("Listening on {}", listener.local_addr()?);

    let server = Arc::new(ServerState::from_config(cfg));
    serve(listener, server).await
}
