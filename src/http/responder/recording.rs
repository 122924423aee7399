use std::io;

use super::{Responder, ResponderState, SendOutcome};
use crate::http::response::EncodedResponse;
use crate::http::writer::WriterError;

/// In-memory responder that keeps what it was asked to emit.
///
/// Used by tests and by code that needs the assembled response instead of
/// wire bytes.
#[derive(Debug, Default)]
pub struct RecordingResponder {
    state: ResponderState,
    response: Option<EncodedResponse>,
    emit_count: usize,
    fail_transport: bool,
}

impl RecordingResponder {
    pub fn new() -> Self {
        RecordingResponder::default()
    }

    /// A responder whose transport always fails with a broken pipe
    pub fn failing() -> Self {
        RecordingResponder {
            fail_transport: true,
            ..RecordingResponder::default()
        }
    }

    pub fn response(&self) -> Option<&EncodedResponse> {
        self.response.as_ref()
    }

    pub fn into_response(self) -> Option<EncodedResponse> {
        self.response
    }

    /// Number of times the transport primitive was invoked
    pub fn emit_count(&self) -> usize {
        self.emit_count
    }
}

impl Responder for RecordingResponder {
    fn state(&self) -> ResponderState {
        self.state
    }

    fn record(&mut self, outcome: SendOutcome) {
        self.state = self.state.advance(outcome);
    }

    fn emit(&mut self, response: EncodedResponse) -> Result<(), WriterError> {
        self.emit_count += 1;

        if self.fail_transport {
            return Err(WriterError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "recording transport closed",
            )));
        }

        self.response = Some(response);
        Ok(())
    }
}
