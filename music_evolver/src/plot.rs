// Melody visualization: a time-vs-pitch scatter plot rendered as SVG.
//
// Only melody notes are plotted (see `Composition::melody_points`). The axis
// labels "Time (s)" and "MIDI Pitch" are fixed; everything else about the
// layout is cosmetic.
//
// Drawing goes through a `Canvas` that owns the output buffer. A canvas is
// acquired with `Canvas::new`, drawn on, and consumed by `finish`, which
// closes the document and hands back the text. There is no shared figure
// state between renders.

use crate::compose::Composition;
use crate::error::Result;
use log::debug;
use std::fmt::Write;
use std::path::Path;

pub const X_LABEL: &str = "Time (s)";
pub const Y_LABEL: &str = "MIDI Pitch";
pub const TITLE: &str = "Melody Notes Over Time";

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 35.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARKER_RADIUS: f64 = 4.0;
const MARKER_COLOR: &str = "blue";

/// Data-space bounds of the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    /// Bounds covering all points with a little padding. Degenerate ranges
    /// (no points, one time, one pitch) are widened so scaling never
    /// divides by zero.
    fn fit(points: &[(f64, u8)]) -> Self {
        if points.is_empty() {
            return Bounds {
                x_min: 0.0,
                x_max: 1.0,
                y_min: 59.0,
                y_max: 61.0,
            };
        }
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(t, p) in points {
            x_min = x_min.min(t);
            x_max = x_max.max(t);
            y_min = y_min.min(f64::from(p));
            y_max = y_max.max(f64::from(p));
        }
        let x_pad = ((x_max - x_min) * 0.05).max(0.5);
        Bounds {
            x_min: x_min - x_pad,
            x_max: x_max + x_pad,
            y_min: y_min - 1.0,
            y_max: y_max + 1.0,
        }
    }
}

/// A drawing surface. Acquire with `new`, release with `finish`.
struct Canvas {
    buf: String,
    bounds: Bounds,
}

impl Canvas {
    fn new(bounds: Bounds) -> Self {
        let mut buf = String::new();
        let _ = writeln!(
            buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        );
        let _ = writeln!(
            buf,
            r#"<rect x="0" y="0" width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
        );
        Canvas { buf, bounds }
    }

    fn plot_x(&self, t: f64) -> f64 {
        let span = self.bounds.x_max - self.bounds.x_min;
        MARGIN_LEFT + (t - self.bounds.x_min) / span * (WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
    }

    fn plot_y(&self, pitch: f64) -> f64 {
        let span = self.bounds.y_max - self.bounds.y_min;
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        HEIGHT - MARGIN_BOTTOM - (pitch - self.bounds.y_min) / span * plot_height
    }

    fn axes(&mut self) {
        let left = MARGIN_LEFT;
        let right = WIDTH - MARGIN_RIGHT;
        let top = MARGIN_TOP;
        let bottom = HEIGHT - MARGIN_BOTTOM;
        let _ = writeln!(
            self.buf,
            r#"<rect x="{left}" y="{top}" width="{}" height="{}" fill="none" stroke="black"/>"#,
            right - left,
            bottom - top
        );

        // Whole-second ticks on x, whole-semitone ticks on y (thinned to ~8).
        let x_start = self.bounds.x_min.ceil().max(0.0) as i64;
        let x_end = self.bounds.x_max.floor() as i64;
        let x_every = ((x_end - x_start) / 10).max(1);
        for t in (x_start..=x_end).step_by(x_every as usize) {
            let x = self.plot_x(t as f64);
            let _ = writeln!(
                self.buf,
                r#"<line x1="{x:.1}" y1="{bottom}" x2="{x:.1}" y2="{}" stroke="black"/><text x="{x:.1}" y="{}" font-size="11" text-anchor="middle">{t}</text>"#,
                bottom + 4.0,
                bottom + 17.0
            );
        }
        let y_start = self.bounds.y_min.ceil() as i64;
        let y_end = self.bounds.y_max.floor() as i64;
        let y_every = ((y_end - y_start) / 8).max(1);
        for p in (y_start..=y_end).step_by(y_every as usize) {
            let y = self.plot_y(p as f64);
            let _ = writeln!(
                self.buf,
                r#"<line x1="{}" y1="{y:.1}" x2="{left}" y2="{y:.1}" stroke="black"/><text x="{}" y="{:.1}" font-size="11" text-anchor="end">{p}</text>"#,
                left - 4.0,
                left - 7.0,
                y + 4.0
            );
        }
    }

    fn labels(&mut self) {
        let center_x = MARGIN_LEFT + (WIDTH - MARGIN_LEFT - MARGIN_RIGHT) / 2.0;
        let center_y = MARGIN_TOP + (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) / 2.0;
        let _ = writeln!(
            self.buf,
            r#"<text x="{center_x}" y="22" font-size="14" text-anchor="middle">{TITLE}</text>"#
        );
        let _ = writeln!(
            self.buf,
            r#"<text x="{center_x}" y="{}" font-size="12" text-anchor="middle">{X_LABEL}</text>"#,
            HEIGHT - 10.0
        );
        let _ = writeln!(
            self.buf,
            r#"<text x="18" y="{center_y}" font-size="12" text-anchor="middle" transform="rotate(-90 18 {center_y})">{Y_LABEL}</text>"#
        );
    }

    fn marker(&mut self, t: f64, pitch: u8) {
        let x = self.plot_x(t);
        let y = self.plot_y(f64::from(pitch));
        let _ = writeln!(
            self.buf,
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="{MARKER_RADIUS}" fill="{MARKER_COLOR}"/>"#
        );
    }

    /// Close the document and release the buffer.
    fn finish(mut self) -> String {
        self.buf.push_str("</svg>\n");
        self.buf
    }
}

/// Render `(time, pitch)` points as an SVG scatter plot.
pub fn render_melody_svg(points: &[(f64, u8)]) -> String {
    let mut canvas = Canvas::new(Bounds::fit(points));
    canvas.axes();
    canvas.labels();
    for &(t, pitch) in points {
        canvas.marker(t, pitch);
    }
    canvas.finish()
}

/// Plot a composition's melody line and write the SVG to a file.
pub fn write_melody_svg(composition: &Composition, path: &Path) -> Result<()> {
    let points = composition.melody_points();
    let svg = render_melody_svg(&points);
    std::fs::write(path, svg)?;
    debug!("Plotted {} melody notes to {}", points.len(), path.display());
    Ok(())
}
