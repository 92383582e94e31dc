// Reads accelerometer samples from an accelerometer server. The server pushes
// "x,y,z*" records; each decoded record is published as one sample.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::sync::{Mutex, Notify};

use common::codec::RecordDecoder;
use common::{Sample, SensorError};
use publisher::{Publishable, Publisher};

use crate::ports::SensorPort;

const READ_BUFFER_SIZE: usize = 1024;

pub struct StreamAccelerometer {
    sensor_tag: String,
    peer: String,
    stream: Mutex<Option<TcpStream>>,
}

impl StreamAccelerometer {
    /// Connects to the accelerometer server at `addr`.
    /// Returns SensorUnavailable if the server can't be reached.
    pub async fn connect(sensor_tag: &str, addr: &str) -> Result<Self, SensorError> {
        let stream = TcpStream::connect(addr).await.map_err(|e| {
            SensorError::SensorUnavailable(format!("unable to connect to {}: {}", addr, e))
        })?;
        log::info!("Connected to accelerometer server {}", addr);

        Ok(Self {
            sensor_tag: sensor_tag.to_string(),
            peer: addr.to_string(),
            stream: Mutex::new(Some(stream)),
        })
    }
}

#[async_trait]
impl SensorPort for StreamAccelerometer {
    /// Reads until the server closes the connection or the feed is aborted.
    /// A feed can only be started once.
    async fn start(
        &self,
        publisher: Publisher<Sample>,
        abort_signal: Arc<Notify>,
    ) -> Result<(), SensorError> {
        let mut stream = self.stream.lock().await.take().ok_or_else(|| {
            SensorError::SensorUnavailable(format!("stream from {} already consumed", self.peer))
        })?;
        let mut decoder = RecordDecoder::new();
        let mut buffer = [0u8; READ_BUFFER_SIZE];

        loop {
            tokio::select! {
                _ = abort_signal.notified() => {
                    break;
                }

                read = stream.read(&mut buffer) => {
                    let n = read?;
                    if n == 0 {
                        log::error!(
                            "Accelerometer server {} terminated connection, aborting reading",
                            self.peer
                        );
                        break;
                    }
                    for record in decoder.push(&buffer[..n]) {
                        match record {
                            Ok(sample) => publisher.notify_listeners(Arc::new(sample)),
                            Err(e) => log::warn!("Skipping record from {}: {}", self.peer, e),
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn get_tag(&self) -> &str {
        self.sensor_tag.as_str()
    }
}
