//! The five route handlers.

use std::path::{Path, PathBuf};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

use crate::fs::path::{name_to_path, percent_decode, safe_join};
use crate::http::encoding::{self, GZIP};
use crate::http::request::{ContentLengthError, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// `GET /`
pub fn root() -> Response {
    Response::empty(StatusCode::Ok)
}

/// `GET /echo/{msg}`. The message is echoed as received, without decoding.
pub fn echo(msg: &str, accept_encoding: Option<&str>) -> Response {
    if !encoding::accepts_gzip(accept_encoding) {
        return Response::text(msg.to_owned());
    }

    match encoding::gzip(msg.as_bytes()) {
        Ok(compressed) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/plain")
            .header("Content-Encoding", GZIP)
            .sized_body(compressed)
            .build(),
        Err(e) => {
            tracing::warn!(error = %e, "gzip failed, sending uncompressed body");
            Response::text(msg.to_owned())
        }
    }
}

/// `GET /user-agent`
pub fn user_agent(req: &Request) -> Response {
    Response::text(req.user_agent().to_owned())
}

/// Maps the raw `{name}` of a `/files/` path onto the served directory.
fn resolve_file(dir: Option<&Path>, raw: &str) -> Option<PathBuf> {
    let dir = dir?;

    let resolved = percent_decode(raw)
        .and_then(name_to_path)
        .and_then(|name| safe_join(dir, &name));
    match resolved {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::debug!(name = raw, error = %e, "Rejected file name");
            None
        }
    }
}

/// `GET /files/{name}`
pub async fn file_get(dir: Option<&Path>, raw: &str) -> Response {
    let Some(path) = resolve_file(dir, raw) else {
        return Response::not_found();
    };

    match tokio::fs::read(&path).await {
        Ok(data) => Response::octet_stream(data),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "File not readable");
            Response::not_found()
        }
    }
}

/// `POST /files/{name}`
///
/// Reads exactly `Content-Length` bytes from `body` and stores them. A body
/// that ends early is rejected before anything touches the filesystem.
pub async fn file_post<R>(dir: Option<&Path>, raw: &str, req: &Request, body: &mut R) -> Response
where
    R: AsyncRead + Unpin,
{
    let Some(path) = resolve_file(dir, raw) else {
        return Response::not_found();
    };

    let len = match req.content_length() {
        Ok(len) => len,
        Err(ContentLengthError::Missing) => return Response::empty(StatusCode::LengthRequired),
        Err(ContentLengthError::Invalid) => return Response::empty(StatusCode::BadRequest),
    };

    let data = match read_body(body, len).await {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!(expected = len, error = %e, "Upload body incomplete");
            return Response::empty(StatusCode::BadRequest);
        }
    };

    match write_file(&path, &data).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), bytes = data.len(), "Stored upload");
            Response::empty(StatusCode::Created)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to store upload");
            Response::empty(StatusCode::InternalServerError)
        }
    }
}

async fn read_body<R>(body: &mut R, len: u64) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut data = Vec::new();
    (&mut *body).take(len).read_to_end(&mut data).await?;

    if (data.len() as u64) < len {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("got {} of {} bytes", data.len(), len),
        ));
    }
    Ok(data)
}

async fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o644);

    let mut file = options.open(path).await?;
    file.write_all(data).await?;
    file.flush().await
}
