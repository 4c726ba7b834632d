use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::http::headers::HeaderMap;
use crate::http::request::{Method, Request};

/// Upper bound for the request line plus all header lines.
pub const MAX_HEAD_SIZE: u64 = 64 * 1024;

/// Framing errors. Each one ends the connection without a response.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("stream ended before the request head was complete")]
    UnexpectedEof,
    #[error("malformed request line")]
    MalformedRequestLine,
    #[error("request head exceeds 64 KiB")]
    HeadTooLarge,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Splits a request line into method, target and version.
///
/// The line is split on the first two spaces only, so the version is the
/// rest of the line. Empty fields are passed through untouched.
pub fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.splitn(3, ' ');

    let method = parts.next().ok_or(ParseError::MalformedRequestLine)?;
    let path = parts.next().ok_or(ParseError::MalformedRequestLine)?;
    let version = parts.next().ok_or(ParseError::MalformedRequestLine)?;

    Ok((Method::parse(method), path.to_string(), version.to_string()))
}

/// Splits a header line at its first colon.
///
/// Returns `None` for lines without a colon; those are skipped.
pub fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (name, value) = line.split_once(':')?;
    Some((name.trim(), value.trim()))
}

fn is_blank_line(line: &[u8]) -> bool {
    line == b"\r\n" || line == b"\n"
}

/// Reads one `\n` terminated line, terminator included.
///
/// `budget` is the number of head bytes still allowed and is reduced by the
/// length of the line.
async fn read_line<R>(reader: &mut R, budget: &mut u64) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let n = reader.take(*budget).read_until(b'\n', &mut line).await?;
    *budget -= n as u64;

    if line.last() == Some(&b'\n') {
        return Ok(line);
    }

    if *budget == 0 {
        Err(ParseError::HeadTooLarge)
    } else {
        Err(ParseError::UnexpectedEof)
    }
}

/// Reads the request line and headers from `reader`.
///
/// The reader is left positioned at the first body byte.
pub async fn read_request<R>(reader: &mut R) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut budget = MAX_HEAD_SIZE;

    let line = read_line(reader, &mut budget).await?;
    let (method, path, version) = parse_request_line(&String::from_utf8_lossy(&line))?;

    let mut headers = HeaderMap::new();
    loop {
        let line = read_line(reader, &mut budget).await?;
        if is_blank_line(&line) {
            break;
        }

        let line = String::from_utf8_lossy(&line);
        if let Some((name, value)) = parse_header_line(&line) {
            headers.insert(name, value);
        }
    }

    Ok(Request {
        method,
        path,
        version,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parse_simple_get() {
        let mut req: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = read_request(&mut req).await.unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
        assert!(req.is_empty());
    }

    #[test]
    fn blank_line_detection() {
        assert!(is_blank_line(b"\r\n"));
        assert!(is_blank_line(b"\n"));
        assert!(!is_blank_line(b" \r\n"));
    }

    #[tokio::test]
    async fn line_budget_is_enforced() {
        let mut budget = 4;
        let mut input: &[u8] = b"GET / HTTP/1.1\r\n";
        let result = read_line(&mut input, &mut budget).await;
        assert!(matches!(result, Err(ParseError::HeadTooLarge)));
    }
}
