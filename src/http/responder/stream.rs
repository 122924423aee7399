use std::io::Write;

use super::{Responder, ResponderState, SendOutcome};
use crate::http::request::HttpVersion;
use crate::http::response::EncodedResponse;
use crate::http::writer::{write_response, write_response_head, WriterError};

/// Responder that serializes the response onto any byte stream.
///
/// Backed by a `TcpStream` it is the live socket responder; backed by a
/// `Vec<u8>` it buffers the wire bytes in memory.
#[derive(Debug)]
pub struct StreamResponder<W: Write> {
    stream: W,
    version: HttpVersion,
    head_only: bool,
    state: ResponderState,
}

impl<W: Write> StreamResponder<W> {
    /// Creates a responder answering with the given protocol version
    pub fn new(stream: W, version: HttpVersion) -> Self {
        StreamResponder {
            stream,
            version,
            head_only: false,
            state: ResponderState::Unsent,
        }
    }

    /// Answers a HEAD request: headers go out as for GET, the body does not
    pub fn head_only(mut self, head_only: bool) -> Self {
        self.head_only = head_only;
        self
    }

    pub fn version(&self) -> HttpVersion {
        self.version
    }

    pub fn get_ref(&self) -> &W {
        &self.stream
    }

    pub fn into_inner(self) -> W {
        self.stream
    }
}

impl<W: Write> Responder for StreamResponder<W> {
    fn state(&self) -> ResponderState {
        self.state
    }

    fn record(&mut self, outcome: SendOutcome) {
        self.state = self.state.advance(outcome);
    }

    fn emit(&mut self, response: EncodedResponse) -> Result<(), WriterError> {
        if self.head_only {
            write_response_head(&mut self.stream, self.version, &response)
        } else {
            write_response(&mut self.stream, self.version, &response)
        }
    }
}
