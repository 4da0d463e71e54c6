use crate::http::request::{GET, Request};

/// Bytes captured from a single read of the client stream.
pub const MAX_REQUEST_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer does not start with `GET `.
    BadMethod,
    /// `GET ` was followed by no resource token.
    MissingResource,
}

/// Parses the request line at the start of `buf`.
///
/// Only the first two whitespace-delimited tokens are used; the HTTP version
/// and everything after it are ignored. The resource keeps its raw bytes.
pub fn parse_request_line(buf: &[u8]) -> Result<Request, ParseError> {
    if !buf.starts_with(GET.as_bytes()) || buf.get(GET.len()) != Some(&b' ') {
        return Err(ParseError::BadMethod);
    }

    let mut tokens = buf
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty());

    let method = tokens.next().ok_or(ParseError::BadMethod)?;
    let resource = tokens.next().ok_or(ParseError::MissingResource)?;

    Ok(Request::new(String::from_utf8_lossy(method), resource))
}
