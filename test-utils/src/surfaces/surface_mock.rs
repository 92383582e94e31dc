use std::sync::{Arc, Mutex};

use common::traits::Surface;
use common::types::{Color, Rect, Segment};

/// One call received by [`SurfaceMock`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Clear(Rect, Color),
    Line(Segment),
}

/// Surface that records every draw call. Clones share the same record, so a test
/// can keep a handle while the recorder owns the surface.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMock {
    calls: Arc<Mutex<Vec<DrawCall>>>,
}

impl SurfaceMock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DrawCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<Segment> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DrawCall::Line(segment) => Some(segment),
                DrawCall::Clear(..) => None,
            })
            .collect()
    }

    pub fn n_clears(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, DrawCall::Clear(..)))
            .count()
    }

    /// Forgets every recorded call
    pub fn reset(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn record(&self, call: DrawCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Surface for SurfaceMock {
    fn clear(&mut self, rect: Rect, color: Color) {
        self.record(DrawCall::Clear(rect, color));
    }

    fn line(&mut self, segment: &Segment) {
        self.record(DrawCall::Line(*segment));
    }
}
