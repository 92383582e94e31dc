//! # Crate accel-sensor
//!
//! ## accel-sensor
//!
//! The `accel-sensor` crate provides push based accelerometer feeds. Every feed runs as
//! a background task and publishes each [`Sample`](common::Sample) it produces to the
//! listeners connected through the [`SampleSource`](common::SampleSource) trait.
//!
//! Features include:
//! - A synthetic accelerometer that emits a rest vector with optional Gaussian noise.
//! - A replay feed that emits a recorded list of samples.
//! - A stream feed that connects to an accelerometer server and decodes its
//!   `"x,y,z*"` records.
//! - Stop on Ctrl+C, after a time-to-live, or on request.

pub(crate) mod adapters;
pub(crate) mod models;
pub(crate) mod ports;
pub mod services;

pub use adapters::mock::MockAccelerometer;
pub use adapters::replay::ReplayAccelerometer;
pub use adapters::stream::StreamAccelerometer;
pub use common::SensorError;
pub use ports::SensorPort;
pub use services::{run_mock_service, run_replay_service, run_stream_service, SensorService};
