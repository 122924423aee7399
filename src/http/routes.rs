use std::collections::HashMap;

use serde::Serialize;

use crate::http::{
    request::{HttpMethod, HttpRequest},
    responder::{Responder, ResponderError, ResponderExt},
    response::{HeaderSet, HttpStatusCode},
    server::ServerContext,
};

pub type Params = HashMap<String, String>;

/// Request handler writing its answer through a responder
pub type Handler<R> = fn(&HttpRequest, &Params, &mut R, &ServerContext) -> Result<(), ResponderError>;

/// Largest body the `/bytes/{len}` route will generate
const MAX_GENERATED_BYTES: usize = 64 * 1024;

/// Represents a single route
pub struct Route<R> {
    method: HttpMethod,
    path: String, // /echo/{text}
    handler: Handler<R>,
}

/// Manages routes and dispatches requests
pub struct Router<R> {
    routes: Vec<Route<R>>,
}

impl<R: Responder> Default for Router<R> {
    fn default() -> Self {
        Router::new()
    }
}

impl<R: Responder> Router<R> {
    /// Creates a router with the default routes
    pub fn new() -> Self {
        let mut router = Router { routes: Vec::new() };
        router.get("/", root_handler);
        router.get("/echo/{text}", echo_handler);
        router.get("/user-agent", user_agent_handler);
        router.get("/status", status_handler);
        router.get("/bytes/{len}", bytes_handler);
        router.get("/health", health_handler);

        router
    }

    /// Registers a GET route
    pub fn get(&mut self, path: &str, handler: Handler<R>) {
        self.routes.push(Route {
            method: HttpMethod::Get,
            path: path.to_string(),
            handler,
        });
    }

    /// Finds the matching route and executes its handler
    pub fn route(
        &self,
        request: &HttpRequest,
        responder: &mut R,
        ctx: &ServerContext,
    ) -> Result<(), ResponderError> {
        for route in &self.routes {
            if !request.status_line.method.served_by(route.method) {
                continue;
            }

            if let Some(params) = match_path(&route.path, &request.status_line.path) {
                return (route.handler)(request, &params, responder, ctx);
            }
        }

        responder.send_string(HttpStatusCode::NotFound, "Route not found")
    }
}

/// Matches a request path against a route pattern, capturing `{name}` segments
fn match_path(pattern: &str, path: &str) -> Option<Params> {
    let route_path: Vec<&str> = pattern.split('/').collect();
    let request_path: Vec<&str> = path.split('/').collect();

    if route_path.len() != request_path.len() {
        return None;
    }

    let mut params = Params::new();
    for (segment, actual) in route_path.iter().zip(&request_path) {
        if segment.starts_with('{') && segment.ends_with('}') {
            let key = segment.trim_start_matches('{').trim_end_matches('}');
            params.insert(key.to_string(), actual.to_string());
        } else if segment != actual {
            return None;
        }
    }

    Some(params)
}

#[derive(Debug, Serialize)]
struct ServerStatus<'a> {
    name: &'a str,
    version: &'a str,
    protocol: String,
    routes: [&'a str; 6],
}

/// Handler that handles root path
pub fn root_handler<R: Responder>(
    _request: &HttpRequest,
    _params: &Params,
    responder: &mut R,
    _ctx: &ServerContext,
) -> Result<(), ResponderError> {
    responder.send_string(HttpStatusCode::Ok, "Welcome to the Rust HTTP Server!")
}

/// Handler that echoes text parameter
pub fn echo_handler<R: Responder>(
    _request: &HttpRequest,
    params: &Params,
    responder: &mut R,
    _ctx: &ServerContext,
) -> Result<(), ResponderError> {
    let body = params.get("text").map(|s| s.as_str()).unwrap_or("");
    responder.send_string(HttpStatusCode::Ok, body)
}

/// Handler that returns the User-Agent header, or no body when it is absent
pub fn user_agent_handler<R: Responder>(
    request: &HttpRequest,
    _params: &Params,
    responder: &mut R,
    _ctx: &ServerContext,
) -> Result<(), ResponderError> {
    let headers = HeaderSet::new().with("Vary", "User-Agent");
    responder.send_string_with_headers(
        HttpStatusCode::Ok,
        request.header("User-Agent"),
        Some(headers),
    )
}

/// Handler that describes the server as JSON
pub fn status_handler<R: Responder>(
    request: &HttpRequest,
    _params: &Params,
    responder: &mut R,
    ctx: &ServerContext,
) -> Result<(), ResponderError> {
    let status = ServerStatus {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        protocol: request.status_line.version.to_string(),
        routes: [
            "/",
            "/echo/{text}",
            "/user-agent",
            "/status",
            "/bytes/{len}",
            "/health",
        ],
    };

    responder.send_json_with(HttpStatusCode::Ok, &status, &ctx.serializer)
}

/// Handler that returns `len` bytes counting up from zero
pub fn bytes_handler<R: Responder>(
    _request: &HttpRequest,
    params: &Params,
    responder: &mut R,
    _ctx: &ServerContext,
) -> Result<(), ResponderError> {
    let len = params.get("len").and_then(|s| s.parse::<usize>().ok());

    match len {
        Some(len) if len <= MAX_GENERATED_BYTES => {
            let body: Vec<u8> = (0..len).map(|i| (i % 256) as u8).collect();
            responder.send_bytes(HttpStatusCode::Ok, body, None)
        }
        Some(_) => responder.send_string(
            HttpStatusCode::PayloadTooLarge,
            &format!("at most {} bytes can be generated", MAX_GENERATED_BYTES),
        ),
        None => responder.send_string(HttpStatusCode::BadRequest, "length must be a number"),
    }
}

/// Handler for liveness checks
pub fn health_handler<R: Responder>(
    _request: &HttpRequest,
    _params: &Params,
    responder: &mut R,
    _ctx: &ServerContext,
) -> Result<(), ResponderError> {
    responder.send_status(HttpStatusCode::NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::responder::RecordingResponder;
    use crate::http::response::{EncodedResponse, SerdeJsonSerializer};
    use serde_json::Value;

    fn get(path: &str, extra: &[&str]) -> EncodedResponse {
        request("GET", path, extra)
    }

    fn request(method: &str, path: &str, extra: &[&str]) -> EncodedResponse {
        let mut lines = vec![format!("{} {} HTTP/1.1", method, path)];
        lines.extend(extra.iter().map(|s| s.to_string()));
        let request = HttpRequest::parse(lines).unwrap();

        let router = Router::new();
        let ctx = ServerContext::new(SerdeJsonSerializer::compact());
        let mut responder = RecordingResponder::new();
        router.route(&request, &mut responder, &ctx).unwrap();

        responder.into_response().unwrap()
    }

    #[test]
    fn test_match_path() {
        let params = match_path("/echo/{text}", "/echo/hello").unwrap();
        assert_eq!(params.get("text").map(|s| s.as_str()), Some("hello"));

        assert!(match_path("/echo/{text}", "/echo").is_none());
        assert!(match_path("/status", "/health").is_none());
        assert!(match_path("/", "/").unwrap().is_empty());
    }

    #[test]
    fn test_echo_route() {
        let response = get("/echo/abc", &[]);

        assert_eq!(response.status(), HttpStatusCode::Ok);
        assert_eq!(response.body().unwrap(), "abc");
    }

    #[test]
    fn test_user_agent_route() {
        let response = get("/user-agent", &["User-Agent: foobar/1.2.3"]);
        assert_eq!(response.body().unwrap(), "foobar/1.2.3");
        assert_eq!(response.headers().get("vary"), Some("User-Agent"));

        let response = get("/user-agent", &[]);
        assert!(response.body().is_none());
        assert!(response.content_type().is_none());
    }

    #[test]
    fn test_status_route() {
        let response = get("/status", &[]);
        let body: Value = serde_json::from_slice(response.body().unwrap()).unwrap();

        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(body["name"], "http-responder");
        assert_eq!(body["protocol"], "HTTP/1.1");
    }

    #[test]
    fn test_bytes_route() {
        let response = get("/bytes/300", &[]);
        let body = response.body().unwrap();

        assert_eq!(body.len(), 300);
        assert_eq!(body[257], 1);
        assert_eq!(response.content_type(), Some("application/octet-stream"));

        assert_eq!(get("/bytes/x", &[]).status(), HttpStatusCode::BadRequest);
        assert_eq!(
            get("/bytes/1000000", &[]).status(),
            HttpStatusCode::PayloadTooLarge
        );
    }

    #[test]
    fn test_health_and_missing_routes() {
        let response = get("/health", &[]);
        assert_eq!(response.status(), HttpStatusCode::NoContent);
        assert!(response.body().is_none());

        let response = get("/nope", &[]);
        assert_eq!(response.status(), HttpStatusCode::NotFound);
        assert_eq!(response.body().unwrap(), "Route not found");
    }

    #[test]
    fn test_head_uses_get_routes() {
        let response = request("HEAD", "/", &[]);
        assert_eq!(response.status(), HttpStatusCode::Ok);
        assert_eq!(response, get("/", &[]));

        let response = request("HEAD", "/echo/abc", &[]);
        assert_eq!(response.body().unwrap(), "abc");

        assert_eq!(
            request("POST", "/", &[]).status(),
            HttpStatusCode::NotFound
        );
    }
}
