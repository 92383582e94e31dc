use log::error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::adapters::{
    mock::MockAccelerometer, replay::ReplayAccelerometer, stream::StreamAccelerometer,
};
use crate::models::shutdown;
use crate::ports::SensorPort;
use common::traits::{Notifiable, SampleSource};
use common::{Sample, SensorError};
use publisher::{Publishable, Publisher};

/// Generic accelerometer feed service
pub struct SensorService<C>
where
    C: SensorPort,
{
    client: C,
    publisher: Publisher<Sample>,
    abort_signal: Arc<Notify>,
    finished: AtomicBool,
}

impl<C> SensorService<C>
where
    C: SensorPort,
{
    pub fn new(client: C) -> Self {
        SensorService {
            client,
            publisher: Publisher::new(),
            abort_signal: Arc::new(Notify::new()),
            finished: AtomicBool::new(false),
        }
    }

    /// Starts the data acquisition process. The process is stopped with a SIGINT signal,
    /// after `run_for_millis` or by calling `stop`.
    /// Once the feed is over, every listener is disconnected.
    pub async fn start(&self, run_for_millis: Option<u64>) -> Result<(), SensorError> {
        let shutdown_handle =
            shutdown::listen_for_shutdown(Arc::clone(&self.abort_signal), run_for_millis);
        let result = self
            .client
            .start(self.publisher.clone(), self.abort_signal.clone())
            .await;

        shutdown_handle.abort();
        self.finished.store(true, Ordering::SeqCst);
        self.publisher.unregister_all();
        result
    }

    /// Requests the feed to stop
    pub fn stop(&self) {
        self.abort_signal.notify_one();
    }

    /// Returns true once the feed has stopped
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// Number of connected listeners
    pub fn n_listeners(&self) -> usize {
        self.publisher.len()
    }
}

impl<C> SampleSource for SensorService<C>
where
    C: SensorPort + Send + Sync,
{
    fn get_tag(&self) -> &str {
        self.client.get_tag()
    }

    fn connect(&self, listener: &mut dyn Notifiable<Sample>) -> Result<Uuid, SensorError> {
        if self.is_finished() {
            return Err(SensorError::SensorUnavailable(format!(
                "feed {} has stopped",
                self.get_tag()
            )));
        }
        Ok(self.publisher.register_listener(listener))
    }

    fn disconnect(&self, id: Uuid) -> Result<(), SensorError> {
        self.publisher
            .unregister_listener(id)
            .map_err(|e| SensorError::ListenerNotFound(e.to_string()))
    }
}

fn spawn_service<C>(
    service: Arc<SensorService<C>>,
    run_for_millis: Option<u64>,
) -> tokio::task::JoinHandle<()>
where
    C: SensorPort + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = service.start(run_for_millis).await {
            error!("Error in accelerometer feed {}: {}", service.client.get_tag(), e);
        }
    })
}

/// Starts a synthetic accelerometer that emits `rest` (plus optional noise) every
/// `update_period_millis`. The feed runs until Ctrl+C, or for `run_for_millis` if given.
///
/// # Returns
///
/// Returns a tuple containing:
/// * A `tokio::task::JoinHandle<()>` representing the spawned asynchronous task.
/// * An `Arc<SensorService<MockAccelerometer>>` instance listeners can connect to.
pub fn run_mock_service(
    sensor_tag: &str,
    rest: Sample,
    update_period_millis: u64,
    add_sensor_noise: bool,
    run_for_millis: Option<u64>,
) -> Result<
    (
        tokio::task::JoinHandle<()>,
        Arc<SensorService<MockAccelerometer>>,
    ),
    SensorError,
> {
    let mock = MockAccelerometer::new(sensor_tag, rest, update_period_millis, add_sensor_noise)?;
    let service = Arc::new(SensorService::new(mock));
    let handle = spawn_service(service.clone(), run_for_millis);
    Ok((handle, service))
}

/// Starts a feed replaying `samples` every `update_period_millis`.
/// Returns SensorUnavailable if `samples` is empty.
pub fn run_replay_service(
    sensor_tag: &str,
    samples: Vec<Sample>,
    update_period_millis: u64,
    cycle: bool,
    run_for_millis: Option<u64>,
) -> Result<
    (
        tokio::task::JoinHandle<()>,
        Arc<SensorService<ReplayAccelerometer>>,
    ),
    SensorError,
> {
    let replay = ReplayAccelerometer::new(sensor_tag, samples, update_period_millis, cycle)?;
    let service = Arc::new(SensorService::new(replay));
    let handle = spawn_service(service.clone(), run_for_millis);
    Ok((handle, service))
}

/// Connects to the accelerometer server at `addr` and publishes the samples it streams.
/// Returns SensorUnavailable if the server can't be reached.
pub async fn run_stream_service(
    sensor_tag: &str,
    addr: &str,
    run_for_millis: Option<u64>,
) -> Result<
    (
        tokio::task::JoinHandle<()>,
        Arc<SensorService<StreamAccelerometer>>,
    ),
    SensorError,
> {
    let stream = StreamAccelerometer::connect(sensor_tag, addr).await?;
    let service = Arc::new(SensorService::new(stream));
    let handle = spawn_service(service.clone(), run_for_millis);
    Ok((handle, service))
}
