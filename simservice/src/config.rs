use std::net::{AddrParseError, SocketAddr};

/// Default listen address.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Default request body ceiling (10 KiB).
pub const DEFAULT_MAX_BODY: usize = 10 * 1024;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Listen address (e.g., "127.0.0.1:8080" or ":8080").
    pub addr: String,
    /// Max request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY,
        }
    }
}

impl ServiceConfig {
    /// Set the listen address.
    pub fn with_addr(mut self, addr: impl Into<String>) -> Self {
        self.addr = addr.into();
        self
    }

    /// Listen on all interfaces at `port`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr = format!("0.0.0.0:{port}");
        self
    }

    /// Set the request body ceiling.
    pub fn with_max_body(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    /// Parse the listen address. A leading `:` means all interfaces.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr).parse()
        } else {
            self.addr.parse()
        }
    }
}
