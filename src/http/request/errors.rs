use thiserror::Error;

use super::types::HttpVersion;
use crate::http::response::HttpStatusCode;

/// Represents an error that occurred while parsing an HTTP request
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to parse request: {reason} ({status})")]
pub struct ParseError {
    pub status: HttpStatusCode,
    pub version: HttpVersion,
    pub reason: &'static str,
}

impl ParseError {
    pub(super) fn new(status: HttpStatusCode, reason: &'static str) -> Self {
        ParseError {
            status,
            version: HttpVersion::Http1_1,
            reason,
        }
    }
}
