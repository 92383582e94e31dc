// Replays a recorded list of accelerometer samples at a fixed rate.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use common::{Sample, SensorError};
use publisher::{Publishable, Publisher};

use crate::ports::SensorPort;

pub struct ReplayAccelerometer {
    sensor_tag: String,
    samples: Vec<Sample>,
    sampling_period: Duration,
    cycle: bool,
}

impl ReplayAccelerometer {
    /// Returns SensorUnavailable if there is nothing to replay.
    pub fn new(
        sensor_tag: &str,
        samples: Vec<Sample>,
        sampling_period_millis: u64,
        cycle: bool,
    ) -> Result<Self, SensorError> {
        if samples.is_empty() {
            return Err(SensorError::SensorUnavailable(
                "no samples to replay".to_string(),
            ));
        }
        Ok(Self {
            sensor_tag: sensor_tag.to_string(),
            samples,
            sampling_period: Duration::from_millis(sampling_period_millis),
            cycle,
        })
    }
}

#[async_trait]
impl SensorPort for ReplayAccelerometer {
    /// Publishes the recording once, or forever when cycling.
    async fn start(
        &self,
        publisher: Publisher<Sample>,
        abort_signal: Arc<Notify>,
    ) -> Result<(), SensorError> {
        log::info!(
            "Replaying {} samples on {}",
            self.samples.len(),
            self.sensor_tag
        );
        let mut idx = 0;

        loop {
            tokio::select! {
                _ = abort_signal.notified() => {
                    break;
                }

                _ = tokio::time::sleep(self.sampling_period) => {
                    publisher.notify_listeners(Arc::new(self.samples[idx]));
                    idx += 1;
                    if idx == self.samples.len() {
                        if !self.cycle {
                            log::info!("Replay of {} finished", self.sensor_tag);
                            break;
                        }
                        idx = 0;
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
