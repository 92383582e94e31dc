// Emulates an accelerometer resting on a table, optionally with sensor noise.

mod gaussian;

use async_trait::async_trait;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use common::{Sample, SensorError};
use publisher::{Publishable, Publisher};

use crate::ports::SensorPort;
use gaussian::GaussianNoise;

const GAUSSIAN_SENSOR_MEAN: f64 = 0f64;
const GAUSSIAN_SENSOR_STDEV: f64 = 4.0;

/// Configures mock data acquisition
pub struct MockAccelerometer {
    sensor_tag: String,
    rest: Sample,
    sampling_period: Duration,
    sensor_noise: Option<GaussianNoise>,
}

impl MockAccelerometer {
    /// Creates a mock feed emitting `rest` every `sampling_period_millis`.
    /// Returns SensorUnavailable if the period is zero.
    pub fn new(
        sensor_tag: &str,
        rest: Sample,
        sampling_period_millis: u64,
        add_sensor_noise: bool,
    ) -> Result<Self, SensorError> {
        if sampling_period_millis == 0 {
            return Err(SensorError::SensorUnavailable(
                "sampling period must be positive".to_string(),
            ));
        }
        let sensor_noise = if add_sensor_noise {
            GaussianNoise::new(GAUSSIAN_SENSOR_MEAN, GAUSSIAN_SENSOR_STDEV)
        } else {
            None
        };
        Ok(Self {
            sensor_tag: sensor_tag.to_string(),
            rest,
            sampling_period: Duration::from_millis(sampling_period_millis),
            sensor_noise,
        })
    }

    fn next_sample(&self, rng: &mut StdRng) -> Sample {
        match self.sensor_noise.as_ref() {
            Some(noise) => noise.add_noise(rng, self.rest),
            None => self.rest,
        }
    }
}

#[async_trait]
impl SensorPort for MockAccelerometer {
    async fn start(
        &self,
        publisher: Publisher<Sample>,
        abort_signal: Arc<Notify>,
    ) -> Result<(), SensorError> {
        let mut rng = StdRng::from_entropy();
        log::info!("Connecting to accelerometer {} and starting readout", self.sensor_tag);

        loop {
            tokio::select! {
                _ = abort_signal.notified() => {
                    break;
                }

                _ = tokio::time::sleep(self.sampling_period) => {
                    let sample = self.next_sample(&mut rng);
                    publisher.notify_listeners(Arc::new(sample));
                }
            }
        }

        log::info!("Closing connection to accelerometer {}", self.sensor_tag);
        Ok(())
    }

    fn get_tag(&self) -> &str {
        self.sensor_tag.as_str()
    }
}
