use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::http::parser::{ParseError, read_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Most unread request bytes discarded after the response is sent.
const DRAIN_LIMIT: u64 = 64 * 1024;
/// How long the connection lingers for those bytes.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// One client connection, serving exactly one request.
///
/// Generic over the stream so tests can drive it with in-memory pipes.
pub struct Connection<S> {
    stream: BufReader<S>,
    router: Arc<Router>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Routing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>) -> Self {
        Self {
            stream: BufReader::new(stream),
            router,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the connection to `Closed`.
    ///
    /// A request that cannot be framed closes the connection without a
    /// single byte written. Every path ends with the stream shut down.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;
        // The peer may already be gone; that is not worth reporting.
        let _ = self.stream.shutdown().await;
        self.drain().await;
        result
    }

    /// Discards request bytes nobody read, such as the body of an upload
    /// rejected before it was consumed. Dropping a TCP socket with unread
    /// input makes the kernel send a reset, and a reset can wipe out a
    /// response the client has not read yet.
    async fn drain(&mut self) {
        let mut rest = (&mut self.stream).take(DRAIN_LIMIT);
        let mut sink = tokio::io::sink();
        let discard = tokio::io::copy(&mut rest, &mut sink);
        let _ = tokio::time::timeout(DRAIN_TIMEOUT, discard).await;
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    if let Some(req) = self.read_request().await? {
                        self.state = ConnectionState::Routing(req);
                    }
                }

                ConnectionState::Routing(req) => {
                    let response = self.router.dispatch(&req, &mut self.stream).await;

                    tracing::info!(
                        method = %req.method,
                        path = %req.path,
                        headers = req.headers.len(),
                        status = response.status.as_u16(),
                        "Request handled"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                }

                ConnectionState::Closed => return Ok(()),
            }
        }
    }

    /// Reads the request head. `None` means the connection is to be closed
    /// silently.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        match read_request(&mut self.stream).await {
            Ok(req) => Ok(Some(req)),
            Err(ParseError::Io(e)) => Err(e.into()),
            Err(e) => {
                tracing::debug!(error = %e, "Closing connection without response");
                Ok(None)
            }
        }
    }
}
