//! The responder contract.
//!
//! A [`Responder`] emits exactly one response per request. Concrete
//! responders implement [`Responder::emit`] and keep their
//! [`ResponderState`]; the typed send operations live in [`ResponderExt`],
//! which every responder gets through a blanket impl and cannot override.
//! All of them funnel through [`ResponderExt::send_content`], so every
//! backend encodes and assembles responses identically.

pub mod recording;
pub mod stream;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::http::response::{
    assemble, encode_bytes, encode_json, encode_text, Encoded, EncodedResponse, EncodingError,
    HeaderSet, HttpStatusCode, JsonSerializer, DEFAULT_SERIALIZER,
};
use crate::http::writer::WriterError;

pub use recording::RecordingResponder;
pub use stream::StreamResponder;

/// Lifecycle of a responder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponderState {
    #[default]
    Unsent,
    Sent,
    Failed, // emit returned an error, the connection is unusable
}

impl ResponderState {
    /// Applies the outcome of a send. Only an unsent responder moves.
    pub fn advance(self, outcome: SendOutcome) -> Self {
        match (self, outcome) {
            (ResponderState::Unsent, SendOutcome::Sent) => ResponderState::Sent,
            (ResponderState::Unsent, SendOutcome::Failed) => ResponderState::Failed,
            (settled, _) => settled,
        }
    }
}

/// Result of handing a response to the transport. There is no way back to
/// [`ResponderState::Unsent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Failed,
}

/// Errors returned by the send operations
#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("failed to encode response body: {0}")]
    Encoding(#[from] EncodingError),
    #[error("response already sent (responder is {0:?})")]
    AlreadySent(ResponderState),
    #[error("failed to write response: {0}")]
    Transport(#[from] WriterError),
}

pub trait Responder {
    fn state(&self) -> ResponderState;

    /// Records the outcome of an emit; implementations apply it with
    /// [`ResponderState::advance`]
    fn record(&mut self, outcome: SendOutcome);

    /// Hands one assembled response to the transport
    fn emit(&mut self, response: EncodedResponse) -> Result<(), WriterError>;
}

/// Typed send operations, implemented once for every [`Responder`]
pub trait ResponderExt: Responder {
    fn is_sent(&self) -> bool {
        self.state() != ResponderState::Unsent
    }

    /// Assembles and emits a response. Every typed send ends here.
    fn send_content(
        &mut self,
        status: HttpStatusCode,
        encoded: Option<Encoded>,
        headers: Option<HeaderSet>,
    ) -> Result<(), ResponderError> {
        ensure_unsent(self.state())?;

        let response = assemble(status, encoded, headers);
        match self.emit(response) {
            Ok(()) => {
                self.record(SendOutcome::Sent);
                Ok(())
            }
            Err(err) => {
                self.record(SendOutcome::Failed);
                Err(err.into())
            }
        }
    }

    /// Sends `value` as JSON using the default serializer
    fn send_json<T>(&mut self, status: HttpStatusCode, value: &T) -> Result<(), ResponderError>
    where
        T: Serialize + ?Sized,
    {
        self.send_json_with(status, value, &DEFAULT_SERIALIZER)
    }

    fn send_json_with<T, S>(
        &mut self,
        status: HttpStatusCode,
        value: &T,
        serializer: &S,
    ) -> Result<(), ResponderError>
    where
        T: Serialize + ?Sized,
        S: JsonSerializer,
    {
        self.send_json_with_headers(status, value, serializer, None)
    }

    /// Sends `value` as JSON. On an encoding failure nothing is emitted and
    /// the responder stays unsent.
    fn send_json_with_headers<T, S>(
        &mut self,
        status: HttpStatusCode,
        value: &T,
        serializer: &S,
        headers: Option<HeaderSet>,
    ) -> Result<(), ResponderError>
    where
        T: Serialize + ?Sized,
        S: JsonSerializer,
    {
        ensure_unsent(self.state())?;

        let encoded = encode_json(value, serializer)?;
        self.send_content(status, Some(encoded), headers)
    }

    fn send_string(&mut self, status: HttpStatusCode, data: &str) -> Result<(), ResponderError> {
        self.send_string_with_headers(status, Some(data), None)
    }

    /// Sends UTF-8 text. Absent text degrades to a status-only response.
    fn send_string_with_headers(
        &mut self,
        status: HttpStatusCode,
        data: Option<&str>,
        headers: Option<HeaderSet>,
    ) -> Result<(), ResponderError> {
        match data {
            Some(text) => self.send_content(status, Some(encode_text(text)), headers),
            None => self.send_status_with_headers(status, headers),
        }
    }

    fn send_status(&mut self, status: HttpStatusCode) -> Result<(), ResponderError> {
        self.send_status_with_headers(status, None)
    }

    fn send_status_with_headers(
        &mut self,
        status: HttpStatusCode,
        headers: Option<HeaderSet>,
    ) -> Result<(), ResponderError> {
        self.send_content(status, None, headers)
    }

    /// Sends raw bytes without copying them
    fn send_bytes(
        &mut self,
        status: HttpStatusCode,
        bytes: impl Into<Bytes>,
        headers: Option<HeaderSet>,
    ) -> Result<(), ResponderError> {
        self.send_content(status, Some(encode_bytes(bytes)), headers)
    }

    fn send_byte_array(
        &mut self,
        status: HttpStatusCode,
        bytes: &[u8],
        headers: Option<HeaderSet>,
    ) -> Result<(), ResponderError> {
        self.send_content(
            status,
            Some(encode_bytes(Bytes::copy_from_slice(bytes))),
            headers,
        )
    }
}

impl<R: Responder + ?Sized> ResponderExt for R {}

fn ensure_unsent(state: ResponderState) -> Result<(), ResponderError> {
    match state {
        ResponderState::Unsent => Ok(()),
        other => Err(ResponderError::AlreadySent(other)),
    }
}
