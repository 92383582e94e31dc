use serde::{Deserialize, Serialize};

/// 24-bit RGB color, `0xRRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const RED: Color = Color(0xFF0000);
    pub const GREEN: Color = Color(0x00DD00);
    pub const BLUE: Color = Color(0x4444FF);

    /// Returns color formatted as `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.0 & 0xFFFFFF)
    }
}

/// 2-D integer point on a drawing surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Colored line segment between two points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: Color,
}

impl Segment {
    pub fn new(from: Point, to: Point, color: Color) -> Self {
        Self { from, to, color }
    }
}

/// Axis aligned rectangle from `(x0, y0)` to `(x1, y1)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle anchored at the origin
    pub fn with_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }
}
