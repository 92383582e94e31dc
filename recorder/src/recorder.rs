use common::traits::Surface;
use common::types::{Axis, Point, Rect, Sample, Segment};

use crate::config::GraphConfig;
use crate::keys::KeyEvent;

/// Whether the next sample becomes the new baseline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecorderState {
    AwaitingBaseline,
    Streaming,
}

/// Draws every incoming sample relative to a baseline, one segment per axis from the
/// previous sample to the current one.
pub struct Recorder<S: Surface> {
    surface: S,
    config: GraphConfig,
    state: RecorderState,
    baseline: Sample,
    previous: Sample,
    position: u32,
}

impl<S: Surface> Recorder<S> {
    /// Creates a recorder waiting for its first baseline. Nothing is drawn until a
    /// sample arrives or `request_rezero` is called.
    pub fn new(surface: S, config: GraphConfig) -> Self {
        Self {
            surface,
            config,
            state: RecorderState::AwaitingBaseline,
            baseline: Sample::zero(),
            previous: Sample::zero(),
            position: 0,
        }
    }

    /// Scales and draws `raw`. Returns the sample relative to the baseline.
    pub fn on_sample(&mut self, raw: Sample) -> Sample {
        let current = raw.scaled(self.config.scale_divisor);

        if self.state == RecorderState::AwaitingBaseline {
            self.baseline = current;
            self.state = RecorderState::Streaming;
            log::debug!("New baseline {}", self.baseline);
        }

        if self.position > self.config.wrap_threshold {
            self.reset();
        }

        let x = (self.position as i32).saturating_add(self.config.x_origin);
        for (axis, channel) in Axis::ALL.iter().zip(self.config.channels.iter()) {
            let base = self.baseline.get(*axis);
            let y = |value: i32| value.saturating_sub(base).saturating_add(channel.offset);
            let segment = Segment::new(
                Point::new(x, y(self.previous.get(*axis))),
                Point::new(x + 1, y(current.get(*axis))),
                channel.color,
            );
            self.surface.line(&segment);
        }

        self.position += 1;
        self.previous = current;
        current - self.baseline
    }

    /// Makes the next sample the new baseline and clears the graph.
    pub fn request_rezero(&mut self) {
        self.state = RecorderState::AwaitingBaseline;
        self.reset();
    }

    /// Clears the graph and restarts drawing from the left edge.
    pub fn reset(&mut self) {
        self.position = 0;
        self.surface.clear(
            Rect::with_size(self.config.width, self.config.height),
            self.config.background,
        );
    }

    /// Re-zeroes on a key-down of the configured key. Returns true if the event was
    /// handled.
    pub fn on_key(&mut self, event: &KeyEvent) -> bool {
        if event.is_down(self.config.rezero_key) {
            log::info!("Re-zero requested");
            self.request_rezero();
            return true;
        }
        false
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn baseline(&self) -> Sample {
        self.baseline
    }

    pub fn previous(&self) -> Sample {
        self.previous
    }

    /// Samples drawn since the last reset
    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Scancode;
    use common::types::Color;
    use once_cell::sync::Lazy;
    use test_utils::surfaces::{DrawCall, SurfaceMock};

    static UNSCALED: Lazy<GraphConfig> = Lazy::new(|| GraphConfig {
        scale_divisor: 1,
        ..GraphConfig::default()
    });

    fn unscaled_recorder() -> (Recorder<SurfaceMock>, SurfaceMock) {
        let surface = SurfaceMock::new();
        (Recorder::new(surface.clone(), UNSCALED.clone()), surface)
    }

    #[test]
    fn test_first_sample_after_rezero_is_zero() {
        let (mut recorder, _surface) = unscaled_recorder();
        recorder.on_sample(Sample::new(9, 9, 9));

        recorder.request_rezero();
        assert_eq!(recorder.state(), RecorderState::AwaitingBaseline);
        let delta = recorder.on_sample(Sample::new(-31, 77, 250));
        assert_eq!(delta, Sample::zero());
        assert_eq!(recorder.baseline(), Sample::new(-31, 77, 250));
        assert_eq!(recorder.state(), RecorderState::Streaming);
    }

    #[test]
    fn test_scenario_deltas_and_position() {
        let (mut recorder, _surface) = unscaled_recorder();
        assert_eq!(recorder.position(), 0);

        let samples = [
            Sample::new(0, 0, 0),
            Sample::new(4, 8, 12),
            Sample::new(4, 8, 12),
        ];
        let expected = [
            Sample::new(0, 0, 0),
            Sample::new(4, 8, 12),
            Sample::new(4, 8, 12),
        ];
        for (i, (sample, delta)) in samples.iter().zip(expected.iter()).enumerate() {
            assert_eq!(recorder.on_sample(*sample), *delta);
            assert_eq!(recorder.position(), i as u32 + 1);
        }
    }

    #[test]
    fn test_segments_layout() {
        let (mut recorder, surface) = unscaled_recorder();
        recorder.on_sample(Sample::new(0, 0, 0));
        recorder.on_sample(Sample::new(4, 8, 12));

        let lines = surface.lines();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[3..],
            [
                Segment::new(Point::new(20, 40), Point::new(21, 44), Color(0xFF0000)),
                Segment::new(Point::new(20, 120), Point::new(21, 128), Color(0x00DD00)),
                Segment::new(Point::new(20, 200), Point::new(21, 212), Color(0x4444FF)),
            ]
        );
    }

    #[test]
    fn test_raw_samples_are_scaled() {
        let surface = SurfaceMock::new();
        let mut recorder = Recorder::new(surface.clone(), GraphConfig::default());
        recorder.on_sample(Sample::new(0, 0, 0));
        assert_eq!(recorder.baseline(), Sample::zero());

        let delta = recorder.on_sample(Sample::new(16, -5, 1027));
        assert_eq!(delta, Sample::new(4, -2, 256));
        assert_eq!(recorder.previous(), Sample::new(4, -2, 256));
    }

    #[test]
    fn test_first_segment_starts_from_zero_sample() {
        // before any sample the previous point is the zero sample, not the baseline
        let (mut recorder, surface) = unscaled_recorder();
        recorder.on_sample(Sample::new(5, 6, 7));

        let lines = surface.lines();
        assert_eq!(lines[0].from, Point::new(19, 40 - 5));
        assert_eq!(lines[0].to, Point::new(20, 40));
    }

    #[test]
    fn test_wraparound_resets_once_before_drawing() {
        let (mut recorder, surface) = unscaled_recorder();
        for _ in 0..=280 {
            recorder.on_sample(Sample::new(1, 2, 3));
        }
        assert_eq!(recorder.position(), 281);
        assert_eq!(surface.n_clears(), 0);
        surface.reset();

        recorder.on_sample(Sample::new(1, 2, 3));

        let calls = surface.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(
            calls[0],
            DrawCall::Clear(Rect::with_size(320, 240), Color::BLACK)
        );
        assert!(matches!(calls[1], DrawCall::Line(s) if s.from.x == 19 && s.to.x == 20));
        assert_eq!(recorder.position(), 1);
    }

    #[test]
    fn test_extreme_samples_saturate() {
        let (mut recorder, surface) = unscaled_recorder();
        recorder.on_sample(Sample::new(i32::MAX, 0, i32::MIN));

        let delta = recorder.on_sample(Sample::new(i32::MIN, i32::MAX, i32::MAX));
        assert_eq!(delta, Sample::new(i32::MIN, i32::MAX, i32::MAX));

        let lines = surface.lines();
        assert_eq!(lines.len(), 6);
        // x: previous sample equals the baseline, current is far below it
        assert_eq!(lines[3].from.y, 40);
        assert_eq!(lines[3].to.y, i32::MIN.saturating_add(40));
        // first segment starts from the zero sample, far from the baseline
        assert_eq!(lines[0].from.y, -i32::MAX + 40);
        assert_eq!(lines[2].from.y, i32::MAX);
    }

    #[test]
    fn test_no_wraparound_at_threshold() {
        let (mut recorder, surface) = unscaled_recorder();
        for _ in 0..280 {
            recorder.on_sample(Sample::zero());
        }
        assert_eq!(recorder.position(), 280);
        recorder.on_sample(Sample::zero());
        assert_eq!(surface.n_clears(), 0);
        assert_eq!(recorder.position(), 281);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut recorder, surface) = unscaled_recorder();
        recorder.on_sample(Sample::new(1, 1, 1));
        recorder.on_sample(Sample::new(2, 2, 2));

        recorder.reset();
        let after_one = (recorder.position(), recorder.state(), recorder.baseline());
        recorder.reset();
        let after_two = (recorder.position(), recorder.state(), recorder.baseline());

        assert_eq!(after_one, after_two);
        assert_eq!(recorder.position(), 0);
        let clears: Vec<DrawCall> = surface
            .calls()
            .into_iter()
            .filter(|c| matches!(c, DrawCall::Clear(..)))
            .collect();
        assert_eq!(clears[0], clears[1]);
    }

    #[test]
    fn test_rezero_clears_immediately() {
        let (mut recorder, surface) = unscaled_recorder();
        recorder.on_sample(Sample::new(1, 1, 1));
        recorder.request_rezero();
        assert_eq!(recorder.position(), 0);
        assert_eq!(surface.n_clears(), 1);
    }

    #[test]
    fn test_on_key() {
        let (mut recorder, surface) = unscaled_recorder();
        recorder.on_sample(Sample::new(3, 3, 3));

        assert!(!recorder.on_key(&KeyEvent::up(Scancode::Select)));
        assert!(!recorder.on_key(&KeyEvent::down(Scancode::Left)));
        assert_eq!(recorder.state(), RecorderState::Streaming);
        assert_eq!(surface.n_clears(), 0);

        assert!(recorder.on_key(&KeyEvent::down(Scancode::Select)));
        assert_eq!(recorder.state(), RecorderState::AwaitingBaseline);
        assert_eq!(surface.n_clears(), 1);
    }
}
