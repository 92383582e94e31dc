//! Module errors
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The sensor feed cannot be connected. Fatal at startup.
    #[error("sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// A peer could not be written to. The peer is dropped, the server keeps going.
    #[error("write to peer {peer} failed: {reason}")]
    PeerWriteFailed { peer: SocketAddr, reason: String },

    /// The listening port can't be bound. Fatal at startup.
    #[error("unable to bind {addr}: {reason}")]
    ListenerBindFailed { addr: SocketAddr, reason: String },

    /// `serve` was called on a server that already ran.
    #[error("server on {0} already started")]
    AlreadyStarted(SocketAddr),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
