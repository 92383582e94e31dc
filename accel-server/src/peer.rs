use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc::{self, error::TrySendError, Sender};
use tokio::task::AbortHandle;

use crate::errors::ServerError;

/// Outgoing side of a connected client.
pub trait PeerSink: Send + Sync {
    fn addr(&self) -> SocketAddr;

    /// Queues `bytes` for the client. Fails once the client can't be written anymore
    /// or has fallen too far behind.
    fn send(&self, bytes: &[u8]) -> Result<(), ServerError>;
}

/// Peer whose socket is written by a dedicated task, so broadcasting never waits on a
/// slow client. Echoes and records share the same queue and reach the client in the
/// order they were sent.
///
/// The writer task lives as long as the peer: it is aborted when the queue
/// overflows or when the last handle to the peer is dropped, closing the socket.
pub struct ChannelPeer {
    addr: SocketAddr,
    tx: Sender<Vec<u8>>,
    writer: AbortHandle,
}

impl ChannelPeer {
    /// Spawns the writer task owning `writer`. At most `capacity` messages wait for
    /// the socket.
    pub fn spawn(addr: SocketAddr, mut writer: OwnedWriteHalf, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(capacity.max(1));
        let handle = tokio::spawn(async move {
            while let Some(bytes) = rx.recv().await {
                if let Err(e) = writer.write_all(&bytes).await {
                    log::warn!("Unable to write to {}: {}", addr, e);
                    break;
                }
            }
            let _ = writer.shutdown().await;
        });
        Self {
            addr,
            tx,
            writer: handle.abort_handle(),
        }
    }

    /// Completes once the writer task is gone and nothing more reaches the client.
    pub async fn closed(&self) {
        self.tx.closed().await
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl PeerSink for ChannelPeer {
    fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn send(&self, bytes: &[u8]) -> Result<(), ServerError> {
        self.tx.try_send(bytes.to_vec()).map_err(|e| {
            let reason = match e {
                TrySendError::Full(_) => {
                    self.writer.abort();
                    "client not reading, outgoing queue full"
                }
                TrySendError::Closed(_) => "connection closed",
            };
            ServerError::PeerWriteFailed {
                peer: self.addr,
                reason: reason.to_string(),
            }
        })
    }
}

impl Drop for ChannelPeer {
    fn drop(&mut self) {
        self.writer.abort();
    }
}
