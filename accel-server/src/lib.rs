//! # Crate accel-server
//!
//! ## accel-server
//!
//! Loopback TCP server streaming accelerometer samples. Every connected client
//! receives each sample of the feed as ASCII `"<x>,<y>,<z>*"`, and whatever a client
//! sends is echoed back to it verbatim.
//!
//! Clients are served concurrently. A client whose socket can no longer be written
//! is dropped on the next broadcast; the others keep receiving.

pub mod broadcaster;
pub mod config;
pub mod errors;
pub mod peer;
pub mod services;

pub use broadcaster::Broadcaster;
pub use config::ServerConfig;
pub use errors::ServerError;
pub use peer::{ChannelPeer, PeerSink};
pub use services::{run_server, AccelServer};
