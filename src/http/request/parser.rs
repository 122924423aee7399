use std::collections::HashMap;

use super::errors::ParseError;
use super::types::{HttpMethod, HttpVersion, RequestStatusLine};
use crate::http::response::HttpStatusCode;

/// Represents the head of a parsed HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub status_line: RequestStatusLine,
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Parses the request line and headers, stopping at the first empty line
    pub fn parse(lines: Vec<String>) -> Result<Self, ParseError> {
        let first = lines
            .first()
            .ok_or_else(|| ParseError::new(HttpStatusCode::BadRequest, "empty request"))?;

        let parts: Vec<&str> = first.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(ParseError::new(
                HttpStatusCode::BadRequest,
                "malformed request line",
            ));
        }

        let version = HttpVersion::from_token(parts[2]).ok_or_else(|| {
            ParseError::new(HttpStatusCode::BadRequest, "unsupported HTTP version")
        })?;

        let method = HttpMethod::from_token(parts[0]).ok_or_else(|| ParseError {
            version,
            ..ParseError::new(HttpStatusCode::MethodNotAllowed, "unknown method")
        })?;

        let path = parts[1];
        if !path.starts_with('/') {
            return Err(ParseError {
                version,
                ..ParseError::new(HttpStatusCode::BadRequest, "request target must be a path")
            });
        }

        let mut headers: HashMap<String, String> = HashMap::new();
        for line in &lines[1..] {
            if line.is_empty() {
                break;
            }

            if let Some((key, value)) = line.split_once(':') {
                headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
            }
        }

        Ok(HttpRequest {
            status_line: RequestStatusLine {
                method,
                path: path.to_string(),
                version,
            },
            headers,
        })
    }

    /// Returns a header value; names are matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_request() {
        let request = HttpRequest::parse(lines(&[
            "GET /echo/abc HTTP/1.1",
            "Host: localhost:4221",
            "User-Agent: curl/8.0",
        ]))
        .unwrap();

        assert_eq!(request.status_line.method, HttpMethod::Get);
        assert_eq!(request.status_line.path, "/echo/abc");
        assert_eq!(request.status_line.version, HttpVersion::Http1_1);
        assert_eq!(request.header("user-agent"), Some("curl/8.0"));
        assert_eq!(request.header("HOST"), Some("localhost:4221"));
    }

    #[test]
    fn test_parse_http_1_0() {
        let request = HttpRequest::parse(lines(&["GET / HTTP/1.0"])).unwrap();
        assert_eq!(request.status_line.version, HttpVersion::Http1_0);
    }

    #[test]
    fn test_parse_errors() {
        let err = HttpRequest::parse(Vec::new()).unwrap_err();
        assert_eq!(err.status, HttpStatusCode::BadRequest);

        let err = HttpRequest::parse(lines(&["GET /"])).unwrap_err();
        assert_eq!(err.status, HttpStatusCode::BadRequest);

        let err = HttpRequest::parse(lines(&["GET / HTTP/2"])).unwrap_err();
        assert_eq!(err.status, HttpStatusCode::BadRequest);

        let err = HttpRequest::parse(lines(&["BREW /pot HTTP/1.0"])).unwrap_err();
        assert_eq!(err.status, HttpStatusCode::MethodNotAllowed);
        assert_eq!(err.version, HttpVersion::Http1_0);
    }
}
