pub mod request;
pub mod responder;
pub mod response;
pub mod routes;
pub mod server;
pub mod writer;

pub use responder::{
    RecordingResponder, Responder, ResponderError, ResponderExt, ResponderState, SendOutcome,
    StreamResponder,
};
pub use response::{EncodedResponse, HeaderSet, HttpStatusCode};
pub use writer::WriterError;
