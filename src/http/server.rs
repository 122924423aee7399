use std::io::{self, BufRead, BufReader, Read};
use std::net::TcpStream;

use tracing::{debug, error, warn};

use crate::http::request::HttpRequest;
use crate::http::responder::{Responder, ResponderError, ResponderExt, StreamResponder};
use crate::http::response::{HeaderSet, HttpStatusCode, SerdeJsonSerializer};
use crate::http::routes::Router;

/// Longest request head the server will read, in lines
const MAX_HEAD_LINES: usize = 100;

/// Longest request head the server will read, in bytes
const MAX_HEAD_BYTES: u64 = 8 * 1024;

/// Read-only state shared by every connection
#[derive(Debug, Clone)]
pub struct ServerContext {
    pub serializer: SerdeJsonSerializer,
}

impl ServerContext {
    pub fn new(serializer: SerdeJsonSerializer) -> Self {
        ServerContext { serializer }
    }
}

/// Handles one client connection: one request, one response
pub fn handle_client(
    stream: TcpStream,
    router: &Router<StreamResponder<TcpStream>>,
    ctx: &ServerContext,
) {
    let request_lines = match read_head(&stream) {
        Ok(lines) => lines,
        Err(e) => {
            warn!(error = %e, "error reading request head");
            return;
        }
    };

    match HttpRequest::parse(request_lines) {
        Ok(request) => {
            debug!(
                method = %request.status_line.method,
                path = %request.status_line.path,
                "dispatching request"
            );

            let method = request.status_line.method;
            let mut responder = StreamResponder::new(stream, request.status_line.version)
                .head_only(method.omits_body());
            let result = router.route(&request, &mut responder, ctx);
            finish(result, &mut responder, "route");
        }
        Err(err) => {
            warn!(status = %err.status, reason = err.reason, "error parsing request");

            let mut responder = StreamResponder::new(stream, err.version);
            let result = responder.send_status_with_headers(
                err.status,
                Some(HeaderSet::new().with("Connection", "close")),
            );
            finish(result, &mut responder, "parse error");
        }
    }
}

/// Reads header lines up to the blank line that ends the head.
///
/// At most `MAX_HEAD_BYTES` are consumed; a head that does not end within
/// that limit, or before the peer stops sending, is `InvalidData`.
fn read_head<R: Read>(source: R) -> io::Result<Vec<String>> {
    let reader = BufReader::new(source.take(MAX_HEAD_BYTES));
    let mut lines = Vec::new();

    for line in reader.lines().take(MAX_HEAD_LINES) {
        let line = line?;
        if line.is_empty() {
            return Ok(lines);
        }
        lines.push(line);
    }

    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        "request head is not terminated within the size limit",
    ))
}

/// Turns a failed send into a final response where that is still possible
fn finish<R: Responder>(result: Result<(), ResponderError>, responder: &mut R, context: &str) {
    match result {
        Ok(()) => {}
        Err(ResponderError::Encoding(e)) => {
            error!(context, error = %e, "response body could not be encoded");
            if !responder.is_sent() {
                if let Err(e) = responder.send_status(HttpStatusCode::InternalServerError) {
                    warn!(context, error = %e, "error sending 500 response");
                }
            }
        }
        Err(e @ ResponderError::AlreadySent(_)) => {
            error!(context, error = %e, "handler sent more than one response");
        }
        Err(ResponderError::Transport(e)) => {
            warn!(context, error = %e, "error writing response, connection may be broken");
        }
    }
}
