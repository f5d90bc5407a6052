//! The network capability.
//!
//! `Fetch` is the single wire-level primitive the typed client needs: POST
//! a JSON body, get a JSON body back. Server-rendering contexts inject an
//! implementation explicitly (ambient network access may be absent there,
//! or must be intercepted); client-navigation contexts fall back to
//! [`AmbientFetch`] at the outermost call site.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ErrorCode, SdkError, SdkResult};

/// The explicit network capability: one JSON POST per call.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Sends `body` to `url` as `application/json` and returns the
    /// response body.
    async fn post_json(&self, url: &str, body: &str) -> SdkResult<String>;
}

/// The ambient transport binding: a plain-HTTP POST over a fresh TCP
/// connection per request.
///
/// Each call owns its connection and buffers, so concurrent requests never
/// share in-flight state.
#[derive(Debug, Clone)]
pub struct AmbientFetch {
    timeout: Duration,
}

impl AmbientFetch {
    /// Creates a fetch with the default 30s per-step timeout.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-step (connect/write/read) timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for AmbientFetch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for AmbientFetch {
    async fn post_json(&self, url: &str, body: &str) -> SdkResult<String> {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpStream;
        use tokio::time::timeout;

        let (host, port, path) = parse_url(url)?;
        debug!(%host, port, %path, "issuing POST");

        let connect_future = TcpStream::connect(format!("{host}:{port}"));
        let mut stream = timeout(self.timeout, connect_future)
            .await
            .map_err(|_| SdkError::timeout())?
            .map_err(|e| {
                SdkError::new(
                    ErrorCode::ConnectionRefused,
                    format!("Connection failed: {e}"),
                )
            })?;

        let mut request = format!(
            "POST {path} HTTP/1.1\r\n\
             Host: {host}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n",
            body.len()
        );
        request.push_str(body);

        let write_future = stream.write_all(request.as_bytes());
        timeout(self.timeout, write_future)
            .await
            .map_err(|_| SdkError::timeout())?
            .map_err(|e| SdkError::network(format!("Write failed: {e}")))?;

        let mut response_bytes = Vec::new();
        let read_future = stream.read_to_end(&mut response_bytes);
        timeout(self.timeout, read_future)
            .await
            .map_err(|_| SdkError::timeout())?
            .map_err(|e| SdkError::network(format!("Read failed: {e}")))?;

        let response_str = String::from_utf8_lossy(&response_bytes);
        parse_http_response(&response_str)
    }
}

/// Parses a URL into host, port, and path.
fn parse_url(url: &str) -> SdkResult<(String, u16, String)> {
    let url = url.trim();

    let without_protocol = if url.starts_with("https://") {
        return Err(SdkError::new(
            ErrorCode::HttpsNotSupported,
            "HTTPS is not supported by the ambient fetch. Inject a Fetch implementation that terminates TLS.",
        ));
    } else if let Some(rest) = url.strip_prefix("http://") {
        rest
    } else {
        url
    };

    let (host_port, path) = match without_protocol.find('/') {
        Some(slash_pos) => (
            &without_protocol[..slash_pos],
            &without_protocol[slash_pos..],
        ),
        None => (without_protocol, "/"),
    };

    let (host, port) = if let Some(colon_pos) = host_port.rfind(':') {
        let host = &host_port[..colon_pos];
        let port_str = &host_port[colon_pos + 1..];
        let port = port_str.parse().map_err(|_| {
            SdkError::new(ErrorCode::InvalidUrl, format!("Invalid port: {port_str}"))
        })?;
        (host.to_string(), port)
    } else {
        (host_port.to_string(), 80)
    };

    Ok((host, port, path.to_string()))
}

/// Parses an HTTP response and extracts the body.
fn parse_http_response(response: &str) -> SdkResult<String> {
    let status_line = response.lines().next().unwrap_or("");
    if status_line.is_empty() {
        return Err(SdkError::new(ErrorCode::InvalidResponse, "Empty response"));
    }

    let status: Option<u16> = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok());
    match status {
        Some(code) if (200..300).contains(&code) => {}
        Some(code) => {
            return Err(SdkError::new(
                ErrorCode::HttpError,
                format!("HTTP error: {code}"),
            ));
        }
        None => {
            return Err(SdkError::new(
                ErrorCode::InvalidResponse,
                format!("Malformed status line: {status_line}"),
            ));
        }
    }

    let headers_end = response
        .find("\r\n\r\n")
        .map(|i| i + 4)
        .or_else(|| response.find("\n\n").map(|i| i + 2))
        .ok_or_else(|| SdkError::new(ErrorCode::InvalidResponse, "Could not find response body"))?;
    let body = &response[headers_end..];

    if header_map(response).get("transfer-encoding").map(String::as_str) == Some("chunked") {
        return parse_chunked_body(body);
    }
    Ok(body.to_string())
}

fn header_map(response: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    for line in response.lines().skip(1) {
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }
    headers
}

/// Parses a chunked transfer encoding body.
fn parse_chunked_body(body: &str) -> SdkResult<String> {
    let mut result = String::new();
    let mut remaining = body;

    loop {
        let Some(size_end) = remaining.find("\r\n").or_else(|| remaining.find('\n')) else {
            break;
        };
        let size_str = remaining[..size_end].trim();

        let chunk_size = usize::from_str_radix(size_str, 16).unwrap_or(0);
        if chunk_size == 0 {
            break;
        }

        let data_start = if remaining.contains("\r\n") {
            size_end + 2
        } else {
            size_end + 1
        };

        if data_start + chunk_size > remaining.len() {
            result.push_str(&remaining[data_start..]);
            break;
        }

        result.push_str(&remaining[data_start..data_start + chunk_size]);
        remaining = &remaining[data_start + chunk_size..];

        if let Some(rest) = remaining.strip_prefix("\r\n") {
            remaining = rest;
        } else if let Some(rest) = remaining.strip_prefix('\n') {
            remaining = rest;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_url_splits_host_port_path() {
        let (host, port, path) = parse_url("http://localhost:4000/graphql").unwrap();
        assert_eq!(host, "localhost");
        assert_eq!(port, 4000);
        assert_eq!(path, "/graphql");

        let (host, port, path) = parse_url("http://example.com/api/graphql").unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, 80);
        assert_eq!(path, "/api/graphql");
    }

    #[test]
    fn https_is_refused() {
        let err = parse_url("https://example.com/graphql").unwrap_err();
        assert_eq!(err.code, ErrorCode::HttpsNotSupported);
    }

    #[test]
    fn invalid_port_is_refused() {
        let err = parse_url("http://example.com:abc/graphql").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUrl);
    }

    #[test]
    fn parses_response_body() {
        let response = "HTTP/1.1 200 OK\r\n\
                       Content-Type: application/json\r\n\
                       \r\n\
                       {\"data\":{\"posts\":[]}}";
        let body = parse_http_response(response).unwrap();
        assert_eq!(body, "{\"data\":{\"posts\":[]}}");
    }

    #[test]
    fn non_success_status_is_an_http_error() {
        let response = "HTTP/1.1 500 Internal Server Error\r\n\r\nboom";
        let err = parse_http_response(response).unwrap_err();
        assert_eq!(err.code, ErrorCode::HttpError);
    }

    #[test]
    fn chunked_bodies_are_reassembled() {
        let chunked = "5\r\nhello\r\n5\r\nworld\r\n0\r\n\r\n";
        assert_eq!(parse_chunked_body(chunked).unwrap(), "helloworld");
    }

    #[test]
    fn chunked_response_end_to_end() {
        let response = "HTTP/1.1 200 OK\r\n\
                       Transfer-Encoding: chunked\r\n\
                       \r\n\
                       4\r\n{\"a\"\r\n3\r\n:1}\r\n0\r\n\r\n";
        assert_eq!(parse_http_response(response).unwrap(), "{\"a\":1}");
    }
}
