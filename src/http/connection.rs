use std::net::IpAddr;
use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{debug, error};

use crate::files::FileAnswer;
use crate::http::parser::{MAX_REQUEST_SIZE, parse_request_line};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::ServerState;

/// Method recorded in the access log for requests that fail to parse.
pub const UNKNOWN_METHOD: &str = "UNKNOWN";

/// Path recorded in the access log for requests that fail to parse.
pub const UNKNOWN_PATH: &str = "/";

/// One client connection, handled from first read to close.
///
/// The stream is owned here and dropped when [`Connection::run`] returns,
/// whichever way it returns.
pub struct Connection<S> {
    stream: S,
    client_ip: String,
    server: Arc<ServerState>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Bytes),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, peer: IpAddr, server: Arc<ServerState>) -> Self {
        Self {
            stream,
            client_ip: peer.to_string(),
            server,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            self.state = match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(raw) => ConnectionState::Processing(raw),
                    // Peer closed before sending anything.
                    None => ConnectionState::Closed,
                },

                ConnectionState::Processing(raw) => match self.handle_request(&raw).await {
                    Some(response) => ConnectionState::Writing(ResponseWriter::new(&response)),
                    None => ConnectionState::Closed,
                },

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => break,
            };
        }

        Ok(())
    }

    /// Performs the single bounded read of the request.
    ///
    /// Anything the client sent beyond `MAX_REQUEST_SIZE` bytes is left
    /// unread; there is no second read.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Bytes>> {
        let mut buf = [0u8; MAX_REQUEST_SIZE];
        let n = self.stream.read(&mut buf).await?;

        if n == 0 {
            return Ok(None);
        }

        Ok(Some(Bytes::copy_from_slice(&buf[..n])))
    }

    /// Turns raw request bytes into a response and records the request.
    ///
    /// Returns `None` when the request is abandoned without a response or a
    /// log entry.
    async fn handle_request(&self, raw: &[u8]) -> Option<Response> {
        debug!("Request:\n{}", String::from_utf8_lossy(raw));

        let (response, method, path) = match parse_request_line(raw) {
            Ok(request) => {
                let path = request.path().into_owned();
                debug!("Requested resource: {}", path);
                let response = match self.server.files.load(&request.resource).await {
                    Ok(FileAnswer::Found(bytes)) => Response::ok(bytes),
                    Ok(FileAnswer::NotFound) => match self.server.files.not_found_page().await {
                        Some(page) => Response::not_found_page(page),
                        None => Response::not_found(),
                    },
                    Err(e) => {
                        error!(
                            client = %self.client_ip,
                            "abandoning request for {}: {}", path, e
                        );
                        return None;
                    }
                };
                (response, request.method, path)
            }
            Err(e) => {
                debug!(client = %self.client_ip, "Bad request: {:?}", e);
                (
                    Response::bad_request(),
                    UNKNOWN_METHOD.to_string(),
                    UNKNOWN_PATH.to_string(),
                )
            }
        };

        self.server
            .access_log
            .record(&self.client_ip, &method, &path, response.status.as_u16())
            .await;

        Some(response)
    }
}
