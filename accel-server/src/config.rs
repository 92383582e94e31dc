use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use common::constants::DEFAULT_SERVER_PORT;

use crate::errors::ServerError;

const DEFAULT_READ_BUFFER_SIZE: usize = 1024;
const DEFAULT_PEER_QUEUE_CAPACITY: usize = 1024;

/// Configuration of the accelerometer server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Loopback address to listen on
    pub host: IpAddr,
    /// Port to listen on. 0 picks a free port.
    pub port: u16,
    /// Bytes read from a client at once before echoing them
    pub read_buffer_size: usize,
    /// Messages queued for a client before it is dropped as not reading
    pub peer_queue_capacity: usize,
    /// Clients served at once. None serves any number of clients.
    pub max_peers: Option<usize>,
    /// Stops the server after this long. None runs until Ctrl+C or `stop`.
    pub run_for_millis: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_SERVER_PORT,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            peer_queue_capacity: DEFAULT_PEER_QUEUE_CAPACITY,
            max_peers: None,
            run_for_millis: None,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ServerError> {
        let config: ServerConfig =
            toml::from_str(content).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The server only ever listens on loopback.
    pub fn validate(&self) -> Result<(), ServerError> {
        if !self.host.is_loopback() {
            return Err(ServerError::Config(format!(
                "host must be a loopback address, got {}",
                self.host
            )));
        }
        if self.read_buffer_size == 0 {
            return Err(ServerError::Config(
                "read_buffer_size must be positive".to_string(),
            ));
        }
        if self.peer_queue_capacity == 0 {
            return Err(ServerError::Config(
                "peer_queue_capacity must be positive".to_string(),
            ));
        }
        if self.max_peers == Some(0) {
            return Err(ServerError::Config(
                "max_peers must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
