use std::fmt;

/// Content types chosen by the payload encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpContentType {
    Json,
    PlainText,
    OctetStream,
}

impl HttpContentType {
    /// Returns the header value for this content type
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpContentType::Json => "application/json",
            HttpContentType::PlainText => "text/plain; charset=utf-8",
            HttpContentType::OctetStream => "application/octet-stream",
        }
    }
}

impl fmt::Display for HttpContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpStatusCode {
    Ok = 200,
    Created = 201,
    Accepted = 202,
    NoContent = 204,
    PartialContent = 206,
    MovedPermanently = 301,
    Found = 302,
    NotModified = 304,
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    Conflict = 409,
    PayloadTooLarge = 413,
    UnsupportedMediaType = 415,
    InternalServerError = 500,
    NotImplemented = 501,
    ServiceUnavailable = 503,
}

const ALL_STATUS_CODES: &[HttpStatusCode] = &[
    HttpStatusCode::Ok,
    HttpStatusCode::Created,
    HttpStatusCode::Accepted,
    HttpStatusCode::NoContent,
    HttpStatusCode::PartialContent,
    HttpStatusCode::MovedPermanently,
    HttpStatusCode::Found,
    HttpStatusCode::NotModified,
    HttpStatusCode::BadRequest,
    HttpStatusCode::Unauthorized,
    HttpStatusCode::Forbidden,
    HttpStatusCode::NotFound,
    HttpStatusCode::MethodNotAllowed,
    HttpStatusCode::Conflict,
    HttpStatusCode::PayloadTooLarge,
    HttpStatusCode::UnsupportedMediaType,
    HttpStatusCode::InternalServerError,
    HttpStatusCode::NotImplemented,
    HttpStatusCode::ServiceUnavailable,
];

impl HttpStatusCode {
    /// Numeric status code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Canonical reason phrase
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            HttpStatusCode::Ok => "OK",
            HttpStatusCode::Created => "Created",
            HttpStatusCode::Accepted => "Accepted",
            HttpStatusCode::NoContent => "No Content",
            HttpStatusCode::PartialContent => "Partial Content",
            HttpStatusCode::MovedPermanently => "Moved Permanently",
            HttpStatusCode::Found => "Found",
            HttpStatusCode::NotModified => "Not Modified",
            HttpStatusCode::BadRequest => "Bad Request",
            HttpStatusCode::Unauthorized => "Unauthorized",
            HttpStatusCode::Forbidden => "Forbidden",
            HttpStatusCode::NotFound => "Not Found",
            HttpStatusCode::MethodNotAllowed => "Method Not Allowed",
            HttpStatusCode::Conflict => "Conflict",
            HttpStatusCode::PayloadTooLarge => "Payload Too Large",
            HttpStatusCode::UnsupportedMediaType => "Unsupported Media Type",
            HttpStatusCode::InternalServerError => "Internal Server Error",
            HttpStatusCode::NotImplemented => "Not Implemented",
            HttpStatusCode::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Looks up a known status by its numeric code
    pub fn from_code(code: u16) -> Option<Self> {
        ALL_STATUS_CODES
            .iter()
            .copied()
            .find(|status| status.code() == code)
    }

    /// Returns true if a response with this status never carries a body
    pub fn forbids_body(&self) -> bool {
        matches!(self, HttpStatusCode::NoContent | HttpStatusCode::NotModified)
    }
}

/// Formats HttpStatusCode for the status line
impl fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(HttpStatusCode::Ok.to_string(), "200 OK");
        assert_eq!(HttpStatusCode::NotFound.to_string(), "404 Not Found");
        assert_eq!(HttpStatusCode::NoContent.to_string(), "204 No Content");
    }

    #[test]
    fn test_from_code() {
        for status in ALL_STATUS_CODES {
            assert_eq!(HttpStatusCode::from_code(status.code()), Some(*status));
        }
        assert_eq!(HttpStatusCode::from_code(418), None);
    }

    #[test]
    fn test_content_type_values() {
        assert_eq!(HttpContentType::Json.to_string(), "application/json");
        assert_eq!(
            HttpContentType::PlainText.to_string(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            HttpContentType::OctetStream.to_string(),
            "application/octet-stream"
        );
    }
}
