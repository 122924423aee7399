use std::io::Write;

use bytes::Bytes;

use super::types::{WriterError, WriterState};
use crate::http::request::HttpVersion;
use crate::http::response::{EncodedResponse, HttpStatusCode};

const CONTENT_LENGTH: &str = "Content-Length";
const CONNECTION: &str = "Connection";

/// Represents an HTTP/1.x response writer
pub struct HttpWriter<'a, W: Write> {
    stream: &'a mut W,
    state: WriterState,
    status_line: Option<String>,
    body_allowed: bool,
    omit_body: bool,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl<'a, W: Write> HttpWriter<'a, W> {
    /// Creates a new HttpWriter
    pub fn new(stream: &'a mut W) -> Self {
        HttpWriter {
            stream,
            state: WriterState::Initial,
            status_line: None,
            body_allowed: true,
            omit_body: false,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Frames the response as usual but leaves the body bytes off the wire
    pub fn omit_body(&mut self) {
        self.omit_body = true;
    }

    /// Writes the status line to the HTTP response
    pub fn write_status_line(
        &mut self,
        version: HttpVersion,
        status: HttpStatusCode,
    ) -> Result<(), WriterError> {
        if self.state != WriterState::Initial {
            self.state = WriterState::Failed;

            return Err(WriterError::InvalidState(
                "Can only write Status Line in Initial state".to_string(),
            ));
        }

        self.status_line = Some(format!("{} {}\r\n", version, status));
        self.body_allowed = !status.forbids_body();

        self.state = WriterState::StatusWritten;

        Ok(())
    }

    /// Appends a header to the HTTP response
    pub fn write_header(&mut self, name: &str, value: &str) -> Result<(), WriterError> {
        if self.state != WriterState::StatusWritten && self.state != WriterState::HeadersOpen {
            self.state = WriterState::Failed;
            return Err(WriterError::InvalidState(
                "Can only write headers in StatusWritten or HeadersOpen state".to_string(),
            ));
        }

        if name.is_empty() || !name.bytes().all(is_token_byte) {
            self.state = WriterState::Failed;
            return Err(WriterError::InvalidHeader(format!(
                "'{}' is not a valid header name",
                name
            )));
        }

        if value.bytes().any(|b| b == b'\r' || b == b'\n') {
            self.state = WriterState::Failed;
            return Err(WriterError::InvalidHeader(format!(
                "value of '{}' contains a line break",
                name
            )));
        }

        self.state = WriterState::HeadersOpen;
        self.headers.push((name.to_string(), value.to_string()));

        Ok(())
    }

    /// Finishes the headers section of the HTTP response, acts as a barrier to writing body
    pub fn finish_headers(&mut self) -> Result<(), WriterError> {
        if self.state != WriterState::HeadersOpen && self.state != WriterState::StatusWritten {
            self.state = WriterState::Failed;
            return Err(WriterError::InvalidState(
                "Can only finish headers in HeadersOpen or StatusWritten state".to_string(),
            ));
        }

        self.state = WriterState::HeadersClosed;

        Ok(())
    }

    /// Writes the body to the HTTP response
    pub fn write_body(&mut self, body: Bytes) -> Result<(), WriterError> {
        if self.state != WriterState::HeadersClosed {
            self.state = WriterState::Failed;
            return Err(WriterError::InvalidState(
                "Can only write body in HeadersClosed state".to_string(),
            ));
        }

        if !self.body_allowed && !body.is_empty() {
            self.state = WriterState::Failed;
            return Err(WriterError::InvalidState(
                "Status does not allow a response body".to_string(),
            ));
        }

        self.body = Some(body);

        self.state = WriterState::BodyWritten;

        Ok(())
    }

    /// Completes the HTTP response writing, ensuring all parts are valid and written
    pub fn complete_write(self) -> Result<(), WriterError> {
        if self.state != WriterState::BodyWritten && self.state != WriterState::HeadersClosed {
            return Err(WriterError::InvalidState(
                "Can only complete in BodyWritten or HeadersClosed state".to_string(),
            ));
        }

        let status_line = self.status_line.ok_or_else(|| {
            WriterError::InvalidState("Status line must be written before completing".to_string())
        })?;

        let body_len = self.body.as_ref().map_or(0, |b| b.len());
        let declared = self
            .headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(CONTENT_LENGTH))
            .map(|(_, value)| value);

        match declared {
            Some(value) => {
                let content_length = value.trim().parse::<usize>().map_err(|_| {
                    WriterError::InvalidHeader("Content-Length must be a valid number".to_string())
                })?;

                if content_length != body_len {
                    return Err(WriterError::ContentLengthMismatch {
                        declared: content_length,
                        actual: body_len,
                    });
                }
            }
            None if self.body_allowed => {
                return Err(WriterError::MissingHeader(
                    "Content-Length header is required".to_string(),
                ));
            }
            None => {}
        }

        self.stream.write_all(status_line.as_bytes())?;
        for (key, value) in &self.headers {
            self.stream
                .write_all(format!("{}: {}\r\n", key, value).as_bytes())?;
        }

        self.stream.write_all(b"\r\n")?;
        if let Some(body) = self.body.as_ref().filter(|_| !self.omit_body) {
            self.stream.write_all(body)?;
        }

        self.stream.flush()?;

        Ok(())
    }
}

/// Writes an assembled response, adding the framing headers the transport owns
pub fn write_response<W: Write>(
    stream: &mut W,
    version: HttpVersion,
    response: &EncodedResponse,
) -> Result<(), WriterError> {
    write_framed(stream, version, response, false)
}

/// Writes the head `write_response` would produce for `response`, without
/// the body. `Content-Length` still describes the body a GET would get.
pub fn write_response_head<W: Write>(
    stream: &mut W,
    version: HttpVersion,
    response: &EncodedResponse,
) -> Result<(), WriterError> {
    write_framed(stream, version, response, true)
}

fn write_framed<W: Write>(
    stream: &mut W,
    version: HttpVersion,
    response: &EncodedResponse,
    omit_body: bool,
) -> Result<(), WriterError> {
    let status = response.status();
    let headers = response.headers();

    let mut writer = HttpWriter::new(stream);
    if omit_body {
        writer.omit_body();
    }
    writer.write_status_line(version, status)?;

    for (name, value) in headers {
        writer.write_header(name, value)?;
    }

    if !status.forbids_body() && !headers.contains(CONTENT_LENGTH) {
        let body_len = response.body().map_or(0, |b| b.len());
        writer.write_header(CONTENT_LENGTH, &body_len.to_string())?;
    }
    if !headers.contains(CONNECTION) {
        writer.write_header(CONNECTION, "close")?;
    }
    writer.finish_headers()?;

    if let Some(body) = response.body() {
        writer.write_body(body.clone())?;
    }

    writer.complete_write()
}

/// RFC 9110 token characters
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
