//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;

/// Environment variable naming the listen address.
pub const BIND_ADDR_VAR: &str = "GROCER_BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration for creating the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a configuration with an explicit listen address.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read configuration from the environment, falling back to the
    /// default listen address when the variable is unset.
    pub fn from_env() -> std::io::Result<Self> {
        let raw = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        parse_bind_addr(&raw).map(Self::new)
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

fn parse_bind_addr(raw: &str) -> std::io::Result<SocketAddr> {
    raw.parse()
        .map_err(|err| std::io::Error::other(format!("invalid {BIND_ADDR_VAR} `{raw}`: {err}")))
}
