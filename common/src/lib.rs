//! General functionality for `accel-rs` library

pub mod codec;
pub mod constants;
pub mod errors;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{Notifiable, SampleSource, Surface};

// Re-export types
#[doc(inline)]
pub use types::{Axis, Callback, Color, Point, Rect, Sample, Segment};

#[doc(inline)]
pub use errors::{CodecError, SensorError};
