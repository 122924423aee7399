use bytes::Bytes;

use super::encoder::Encoded;
use super::headers::{merge_headers, HeaderSet, CONTENT_TYPE};
use super::types::HttpStatusCode;

/// A fully assembled response, ready to hand to a transport.
///
/// Body and content type are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResponse {
    status: HttpStatusCode,
    body: Option<Bytes>,
    content_type: Option<String>,
    headers: HeaderSet,
}

impl EncodedResponse {
    pub fn status(&self) -> HttpStatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Effective content type of the body, if there is one
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Caller headers followed by the content type, when one was added
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn into_parts(self) -> (HttpStatusCode, Option<Bytes>, HeaderSet) {
        (self.status, self.body, self.headers)
    }
}

/// Builds the response for every send path
pub fn assemble(
    status: HttpStatusCode,
    encoded: Option<Encoded>,
    headers: Option<HeaderSet>,
) -> EncodedResponse {
    let (body, default_type) = match encoded {
        Some(Encoded { body, content_type }) => (Some(body), Some(content_type.as_str())),
        None => (None, None),
    };

    let headers = merge_headers(headers, default_type);

    // caller-supplied content type overrides the encoder default
    let content_type = default_type
        .map(|default| headers.get(CONTENT_TYPE).unwrap_or(default).to_string());

    EncodedResponse {
        status,
        body,
        content_type,
        headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::encoder::{encode_bytes, encode_text};

    #[test]
    fn test_status_only_has_no_body_or_content_type() {
        let response = assemble(HttpStatusCode::NoContent, None, None);

        assert_eq!(response.status(), HttpStatusCode::NoContent);
        assert!(response.body().is_none());
        assert!(response.content_type().is_none());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_status_only_keeps_caller_headers() {
        let headers = HeaderSet::new().with("Location", "/next");
        let response = assemble(HttpStatusCode::Found, None, Some(headers.clone()));

        assert!(response.content_type().is_none());
        assert_eq!(response.headers(), &headers);
    }

    #[test]
    fn test_status_only_caller_content_type_stays_a_header() {
        let headers = HeaderSet::new().with("Content-Type", "text/plain");
        let response = assemble(HttpStatusCode::Accepted, None, Some(headers));

        assert!(response.body().is_none());
        assert!(response.content_type().is_none());
        assert_eq!(response.headers().get(CONTENT_TYPE), Some("text/plain"));
        assert_eq!(response.headers().len(), 1);
    }

    #[test]
    fn test_body_and_content_type_together() {
        let response = assemble(HttpStatusCode::Ok, Some(encode_bytes(vec![1u8, 2, 3])), None);

        assert_eq!(response.body().map(|b| &b[..]), Some(&[1u8, 2, 3][..]));
        assert_eq!(response.content_type(), Some("application/octet-stream"));
        assert_eq!(
            response.headers().get(CONTENT_TYPE),
            Some("application/octet-stream")
        );
    }

    #[test]
    fn test_caller_content_type_is_effective() {
        let headers = HeaderSet::new().with("content-type", "text/html; charset=utf-8");
        let response = assemble(HttpStatusCode::Ok, Some(encode_text("<p>hi</p>")), Some(headers));

        assert_eq!(response.content_type(), Some("text/html; charset=utf-8"));
        assert_eq!(response.headers().len(), 1);
    }

    #[test]
    fn test_into_parts() {
        let response = assemble(HttpStatusCode::Created, Some(encode_text("")), None);
        let (status, body, headers) = response.into_parts();

        assert_eq!(status, HttpStatusCode::Created);
        assert_eq!(body, Some(Bytes::new()));
        assert_eq!(headers.len(), 1);
    }
}
