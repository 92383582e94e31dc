pub mod callback;
pub mod drawing;
pub mod sample;

pub use callback::Callback;
pub use drawing::{Color, Point, Rect, Segment};
pub use sample::{Axis, Sample};
