use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, Notify};
use tokio::task::{JoinHandle, JoinSet};
use uuid::Uuid;

use common::traits::SampleSource;
use common::Sample;
use publisher::Listener;

use crate::broadcaster::Broadcaster;
use crate::config::ServerConfig;
use crate::errors::ServerError;
use crate::peer::{ChannelPeer, PeerSink};

/// TCP server forwarding an accelerometer feed to its clients
pub struct AccelServer {
    config: ServerConfig,
    listener: Mutex<Option<TcpListener>>,
    local_addr: SocketAddr,
    broadcaster: Broadcaster,
    abort_signal: Arc<Notify>,
}

impl AccelServer {
    /// Binds the listening socket.
    /// Returns ListenerBindFailed if the address is in use or can't be bound.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        config.validate()?;
        let addr = config.socket_addr();
        let listener =
            TcpListener::bind(addr)
                .await
                .map_err(|e| ServerError::ListenerBindFailed {
                    addr,
                    reason: e.to_string(),
                })?;
        let local_addr = listener.local_addr()?;
        info!("Listening on {}", local_addr);

        Ok(Self {
            config,
            listener: Mutex::new(Some(listener)),
            local_addr,
            broadcaster: Broadcaster::new(),
            abort_signal: Arc::new(Notify::new()),
        })
    }

    /// Forwards every sample of `source` to the connected clients.
    /// Returns SensorUnavailable if the feed refuses the connection.
    pub fn connect_source(&self, source: &dyn SampleSource) -> Result<Uuid, ServerError> {
        let mut listener = Listener::new({
            let broadcaster = self.broadcaster.clone();
            move |_id: Uuid, sample: Arc<Sample>| {
                broadcaster.broadcast(&sample);
            }
        });
        let id = source
            .connect(&mut listener)
            .map_err(|e| ServerError::SensorUnavailable(e.to_string()))?;
        info!("Connected to accelerometer feed {}", source.get_tag());
        Ok(id)
    }

    /// Accepts clients until Ctrl+C, the configured time-to-live or `stop`.
    /// Can only run once.
    pub async fn serve(&self) -> Result<(), ServerError> {
        let listener = self
            .listener
            .lock()
            .await
            .take()
            .ok_or(ServerError::AlreadyStarted(self.local_addr))?;

        let time_to_live = async {
            match self.config.run_for_millis {
                Some(millis) => tokio::time::sleep(Duration::from_millis(millis)).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(time_to_live);

        let mut connections = JoinSet::new();
        loop {
            let accepting = self
                .config
                .max_peers
                .map_or(true, |max_peers| connections.len() < max_peers);
            if accepting {
                info!("Waiting for connection");
            }

            tokio::select! {
                _ = self.abort_signal.notified() => {
                    info!("Stop requested");
                    break;
                }

                _ = &mut time_to_live => {
                    info!("Time-to-live elapsed");
                    break;
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Received Ctrl+C");
                    break;
                }

                accepted = listener.accept(), if accepting => match accepted {
                    Ok((stream, addr)) => {
                        info!("New connection from {}", addr);
                        connections.spawn(handle_connection(
                            stream,
                            addr,
                            self.broadcaster.clone(),
                            self.config.clone(),
                        ));
                    }
                    Err(e) => error!("Unable to accept connection: {}", e),
                },

                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            error!("Connection task panicked: {}", e);
                        }
                    }
                }
            }
        }

        connections.abort_all();
        while connections.join_next().await.is_some() {}
        Ok(())
    }

    /// Disconnects the feed and drops every client.
    pub fn shutdown(&self, source: &dyn SampleSource, listener_id: Uuid) {
        if let Err(e) = source.disconnect(listener_id) {
            warn!("Unable to disconnect from {}: {}", source.get_tag(), e);
        }
        self.broadcaster.clear();
        info!("Server on {} stopped", self.local_addr);
    }

    /// Requests the server to stop
    pub fn stop(&self) {
        self.abort_signal.notify_one();
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of connected clients
    pub fn n_peers(&self) -> usize {
        self.broadcaster.len()
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }
}

/// Registers the client for broadcasts and echoes back whatever it sends until it
/// disconnects or stops keeping up with its outgoing queue.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    broadcaster: Broadcaster,
    config: ServerConfig,
) {
    let (mut reader, writer) = stream.into_split();
    let peer = Arc::new(ChannelPeer::spawn(addr, writer, config.peer_queue_capacity));
    let id = broadcaster.add_peer(peer.clone() as Arc<dyn PeerSink>);

    let mut buffer = vec![0u8; config.read_buffer_size];
    loop {
        tokio::select! {
            _ = peer.closed() => {
                warn!("Peer {} can no longer be written", addr);
                break;
            }

            read = reader.read(&mut buffer) => match read {
                Ok(0) => break,
                Ok(n) => {
                    if let Err(e) = peer.send(&buffer[..n]) {
                        warn!("Unable to echo: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Error reading from {}: {}", addr, e);
                    break;
                }
            },
        }
    }

    info!("Connection from {} terminated", addr);
    broadcaster.remove_peer(id);
}

/// Binds the server described by `config`, connects it to `source` and spawns the
/// accept loop. Every sample of the feed is sent to all the clients connected at the
/// time as `"x,y,z*"`.
///
/// # Returns
///
/// Returns a tuple containing:
/// * A `tokio::task::JoinHandle<()>` completing once the server has stopped.
/// * An `Arc<AccelServer>` to query or stop the server.
///
/// # Errors
///
/// ListenerBindFailed if the port can't be bound, SensorUnavailable if the feed can't
/// be connected. Nothing is left running on error.
pub async fn run_server(
    config: ServerConfig,
    source: Arc<dyn SampleSource>,
) -> Result<(JoinHandle<()>, Arc<AccelServer>), ServerError> {
    let server = Arc::new(AccelServer::bind(config).await?);
    let listener_id = server.connect_source(&*source)?;

    let handle = tokio::spawn({
        let server = server.clone();
        async move {
            if let Err(e) = server.serve().await {
                error!("Error in server on {}: {}", server.local_addr(), e);
            }
            server.shutdown(&*source, listener_id);
        }
    });

    Ok((handle, server))
}
