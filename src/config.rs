use clap::Parser;

use crate::http::response::SerdeJsonSerializer;
use crate::http::server::ServerContext;

/// Command line configuration for the demo server
#[derive(Debug, Clone, Parser)]
#[command(name = "responder-demo", version, about = "Serves a few routes through the HTTP responders")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 4221)]
    pub port: u16,

    /// Indent JSON response bodies
    #[arg(long)]
    pub pretty_json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn context(&self) -> ServerContext {
        let serializer = if self.pretty_json {
            SerdeJsonSerializer::pretty()
        } else {
            SerdeJsonSerializer::compact()
        };

        ServerContext::new(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::parse_from(["responder-demo"]);

        assert_eq!(config.bind_address(), "127.0.0.1:4221");
        assert!(!config.context().serializer.is_pretty());
    }

    #[test]
    fn test_flags() {
        let config =
            ServerConfig::parse_from(["responder-demo", "-p", "8080", "--pretty-json", "-v"]);

        assert_eq!(config.port, 8080);
        assert!(config.verbose);
        assert!(config.context().serializer.is_pretty());
    }
}
