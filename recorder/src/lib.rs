//! # Crate recorder-rs
//!
//! Baseline-relative recorder of accelerometer samples. Every sample is drawn as
//! three line segments (one per axis) on a [`Surface`](common::Surface), relative to
//! a baseline sample captured on re-zero. The graph wraps around after a fixed
//! number of samples.
//!
//! ```
//! use common::{Sample, Surface, Rect, Color, Segment};
//! use recorder_rs::{GraphConfig, Recorder, RecorderState};
//!
//! struct NullSurface;
//! impl Surface for NullSurface {
//!     fn clear(&mut self, _rect: Rect, _color: Color) {}
//!     fn line(&mut self, _segment: &Segment) {}
//! }
//!
//! let mut recorder = Recorder::new(NullSurface, GraphConfig::default());
//! recorder.request_rezero();
//! assert_eq!(recorder.on_sample(Sample::new(40, 80, 120)), Sample::zero());
//! assert_eq!(recorder.state(), RecorderState::Streaming);
//! ```

pub mod config;
pub mod keys;
pub mod recorder;
pub mod services;

pub use config::{ChannelConfig, ConfigError, GraphConfig};
pub use keys::{KeyEvent, KeyEventKind, Scancode};
pub use recorder::{Recorder, RecorderState};
pub use services::{attach, detach, shared, SharedRecorder};
