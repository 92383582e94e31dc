mod plot_surface;
mod surface_mock;

pub use plot_surface::PlotSurface;
pub use surface_mock::{DrawCall, SurfaceMock};
