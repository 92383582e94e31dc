use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use common::codec::encode_record;
use common::Sample;

use crate::peer::PeerSink;

/// Set of connected clients receiving every sample.
#[derive(Clone, Default)]
pub struct Broadcaster {
    peers: Arc<DashMap<Uuid, Arc<dyn PeerSink>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peer(&self, peer: Arc<dyn PeerSink>) -> Uuid {
        let id = Uuid::new_v4();
        self.peers.insert(id, peer);
        id
    }

    /// Returns false if the peer was already gone.
    pub fn remove_peer(&self, id: Uuid) -> bool {
        self.peers.remove(&id).is_some()
    }

    pub fn clear(&self) {
        self.peers.clear();
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Sends `sample` as `"x,y,z*"` to every peer. Peers that can't be written are
    /// dropped. Returns the number of peers the record was delivered to.
    pub fn broadcast(&self, sample: &Sample) -> usize {
        let record = encode_record(sample);
        // snapshot first so failing peers can be removed without holding map guards
        let peers: Vec<(Uuid, Arc<dyn PeerSink>)> = self
            .peers
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        let mut delivered = 0;
        for (id, peer) in peers {
            match peer.send(record.as_bytes()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    log::warn!("Dropping peer: {}", e);
                    self.peers.remove(&id);
                }
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServerError;
    use std::net::SocketAddr;
    use std::sync::Mutex;

    #[derive(Default)]
    struct PeerMock {
        received: Mutex<Vec<String>>,
        broken: bool,
    }

    impl PeerSink for PeerMock {
        fn addr(&self) -> SocketAddr {
            SocketAddr::from(([127, 0, 0, 1], 4000))
        }

        fn send(&self, bytes: &[u8]) -> Result<(), ServerError> {
            if self.broken {
                return Err(ServerError::PeerWriteFailed {
                    peer: self.addr(),
                    reason: "broken pipe".to_string(),
                });
            }
            self.received
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(bytes).into_owned());
            Ok(())
        }
    }

    #[test]
    fn test_record_format() {
        let broadcaster = Broadcaster::new();
        let peer = Arc::new(PeerMock::default());
        broadcaster.add_peer(peer.clone());

        assert_eq!(broadcaster.broadcast(&Sample::new(12, -5, 300)), 1);
        assert_eq!(*peer.received.lock().unwrap(), vec!["12,-5,300*".to_string()]);
    }

    #[test]
    fn test_failing_peer_is_removed() {
        let broadcaster = Broadcaster::new();
        let healthy: Vec<Arc<PeerMock>> = (0..3).map(|_| Arc::new(PeerMock::default())).collect();
        for peer in healthy.iter() {
            broadcaster.add_peer(peer.clone());
        }
        broadcaster.add_peer(Arc::new(PeerMock {
            broken: true,
            ..PeerMock::default()
        }));
        assert_eq!(broadcaster.len(), 4);

        assert_eq!(broadcaster.broadcast(&Sample::new(1, 2, 3)), 3);
        assert_eq!(broadcaster.len(), 3);

        assert_eq!(broadcaster.broadcast(&Sample::new(4, 5, 6)), 3);
        for peer in healthy.iter() {
            assert_eq!(
                *peer.received.lock().unwrap(),
                vec!["1,2,3*".to_string(), "4,5,6*".to_string()]
            );
        }
    }

    #[test]
    fn test_broadcast_without_peers() {
        let broadcaster = Broadcaster::new();
        assert!(broadcaster.is_empty());
        assert_eq!(broadcaster.broadcast(&Sample::zero()), 0);
    }

    #[test]
    fn test_remove_peer() {
        let broadcaster = Broadcaster::new();
        let id = broadcaster.add_peer(Arc::new(PeerMock::default()));
        assert!(broadcaster.remove_peer(id));
        assert!(!broadcaster.remove_peer(id));
        assert!(broadcaster.is_empty());
    }
}
