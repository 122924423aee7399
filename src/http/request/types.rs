use std::fmt;

/// Request methods the server recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Parses a request-line method token. Tokens are case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == token)
    }

    /// Whether a route registered for `route` answers this method.
    /// HEAD is answered by the GET route, minus the body.
    pub fn served_by(self, route: HttpMethod) -> bool {
        self == route || (self == HttpMethod::Head && route == HttpMethod::Get)
    }

    /// HEAD responses carry the GET headers but never a body
    pub fn omits_body(self) -> bool {
        self == HttpMethod::Head
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP protocol versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpVersion {
    Http1_0,
    #[default]
    Http1_1,
}

impl HttpVersion {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "HTTP/1.1" => Some(HttpVersion::Http1_1),
            "HTTP/1.0" => Some(HttpVersion::Http1_0),
            _ => None,
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpVersion::Http1_0 => write!(f, "HTTP/1.0"),
            HttpVersion::Http1_1 => write!(f, "HTTP/1.1"),
        }
    }
}

/// Method, target and version from the first line of a request
#[derive(Debug, Clone)]
pub struct RequestStatusLine {
    pub method: HttpMethod,
    pub path: String,
    pub version: HttpVersion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tokens() {
        assert_eq!(HttpMethod::from_token("HEAD"), Some(HttpMethod::Head));
        assert_eq!(HttpMethod::from_token("DELETE"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::from_token("get"), None);
        assert_eq!(HttpMethod::from_token("PATCH"), None);
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
    }

    #[test]
    fn test_head_is_served_by_get_routes() {
        assert!(HttpMethod::Head.served_by(HttpMethod::Get));
        assert!(HttpMethod::Get.served_by(HttpMethod::Get));
        assert!(!HttpMethod::Get.served_by(HttpMethod::Head));
        assert!(!HttpMethod::Post.served_by(HttpMethod::Get));

        assert!(HttpMethod::Head.omits_body());
        assert!(!HttpMethod::Get.omits_body());
    }

    #[test]
    fn test_version_tokens() {
        assert_eq!(HttpVersion::from_token("HTTP/1.0"), Some(HttpVersion::Http1_0));
        assert_eq!(HttpVersion::from_token("HTTP/2"), None);
    }
}
