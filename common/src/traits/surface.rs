use crate::types::{Color, Rect, Segment};

/// Drawing surface the accelerometer graph is rendered on.
pub trait Surface: Send {
    /// Fills `rect` with a solid `color`
    fn clear(&mut self, rect: Rect, color: Color);
    /// Draws a one pixel wide colored line
    fn line(&mut self, segment: &Segment);
}
