use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use http_responder::config::ServerConfig;
use http_responder::http::responder::StreamResponder;
use http_responder::http::routes::Router;
use http_responder::http::server;
use tracing::{info, warn, Level};

/// Entry point for the HTTP server
fn main() -> Result<()> {
    let config = ServerConfig::parse();

    let level = if config.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let address = config.bind_address();
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind {}", address))?;
    info!(%address, pretty_json = config.pretty_json, "listening");

    let router: Arc<Router<StreamResponder<TcpStream>>> = Arc::new(Router::new());
    let ctx = Arc::new(config.context());

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let peer = stream
                    .peer_addr()
                    .map(|addr| addr.to_string())
                    .unwrap_or_else(|_| "unknown".to_string());
                info!(%peer, "accepted connection");

                let router = Arc::clone(&router);
                let ctx = Arc::clone(&ctx);
                thread::spawn(move || {
                    server::handle_client(stream, &router, &ctx);
                    info!(%peer, "connection closed");
                });
            }
            Err(e) => {
                warn!(error = %e, "error accepting connection");
            }
        }
    }

    Ok(())
}
