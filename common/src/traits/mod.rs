pub mod publisher;
pub mod source;
pub mod surface;

pub use crate::traits::publisher::Notifiable;
pub use crate::traits::source::SampleSource;
pub use crate::traits::surface::Surface;
