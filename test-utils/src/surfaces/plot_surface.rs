use gnuplot::{AutoOption, AxesCommon, Color as LineColor, Figure, LineWidth};
use std::path::Path;

use common::traits::Surface;
use common::types::{Color, Rect, Segment};

/// Surface backed by gnuplot. Segments are kept in memory and rendered on demand,
/// with the y axis pointing down like a screen.
#[derive(Clone, Debug)]
pub struct PlotSurface {
    width: i32,
    height: i32,
    background: Color,
    segments: Vec<Segment>,
}

impl PlotSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            background: Color::BLACK,
            segments: Vec::new(),
        }
    }

    pub fn n_segments(&self) -> usize {
        self.segments.len()
    }

    fn build_figure(&self, title: &str) -> Figure {
        let mut figure = Figure::new();
        let background = self.background.to_hex();
        let axes = figure.axes2d();
        axes.set_title(title, &[]);
        axes.set_x_range(AutoOption::Fix(0.0), AutoOption::Fix(self.width as f64));
        axes.set_y_range(AutoOption::Fix(self.height as f64), AutoOption::Fix(0.0));
        axes.set_x_label(&format!("background {}", background), &[]);

        for segment in &self.segments {
            let color = segment.color.to_hex();
            axes.lines(
                [segment.from.x, segment.to.x],
                [segment.from.y, segment.to.y],
                &[LineColor(color.as_str()), LineWidth(1.0)],
            );
        }
        figure
    }

    /// Opens a gnuplot window with the current content
    pub fn show(&self, title: &str) -> Result<(), String> {
        let mut figure = self.build_figure(title);
        figure
            .show_and_keep_running()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    /// Writes the current content to a png file
    pub fn save_png<P: AsRef<Path>>(&self, path: P, title: &str) -> Result<(), String> {
        let mut figure = self.build_figure(title);
        figure
            .save_to_png(path, self.width as u32 * 3, self.height as u32 * 3)
            .map_err(|e| e.to_string())
    }
}

/// True if any point of `segment` lies inside `rect` (Liang-Barsky clipping).
fn intersects(rect: &Rect, segment: &Segment) -> bool {
    let (x0, y0) = (segment.from.x as f64, segment.from.y as f64);
    let (dx, dy) = (segment.to.x as f64 - x0, segment.to.y as f64 - y0);
    let edges = [
        (-dx, x0 - rect.x0 as f64),
        (dx, rect.x1 as f64 - x0),
        (-dy, y0 - rect.y0 as f64),
        (dy, rect.y1 as f64 - y0),
    ];

    let (mut t_enter, mut t_exit) = (0.0_f64, 1.0_f64);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t_enter = t_enter.max(t);
            } else {
                t_exit = t_exit.min(t);
            }
        }
    }
    t_enter <= t_exit
}

impl Surface for PlotSurface {
    /// Forgets every segment with any part inside `rect`
    fn clear(&mut self, rect: Rect, color: Color) {
        self.background = color;
        self.segments.retain(|s| !intersects(&rect, s));
    }

    fn line(&mut self, segment: &Segment) {
        self.segments.push(*segment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::Point;

    #[test]
    fn test_clear_drops_segments_inside_rect() {
        let mut surface = PlotSurface::new(320, 240);
        surface.line(&Segment::new(Point::new(19, 40), Point::new(20, 42), Color::RED));
        surface.line(&Segment::new(Point::new(300, 500), Point::new(301, 501), Color::BLUE));
        assert_eq!(surface.n_segments(), 2);

        surface.clear(Rect::with_size(320, 240), Color::BLACK);
        assert_eq!(surface.n_segments(), 1);
    }

    #[test]
    fn test_clear_drops_segments_crossing_the_edge() {
        let mut surface = PlotSurface::new(320, 240);
        // one end on the canvas, one below it
        surface.line(&Segment::new(Point::new(50, 200), Point::new(51, 900), Color::RED));
        // both ends off the canvas, crossing it
        surface.line(&Segment::new(Point::new(60, -100), Point::new(61, 400), Color::GREEN));
        // off the canvas, passing beside a corner
        surface.line(&Segment::new(Point::new(330, -20), Point::new(340, 10), Color::BLUE));

        surface.clear(Rect::with_size(320, 240), Color::BLACK);
        assert_eq!(surface.n_segments(), 1);
    }
}
