//! Drawing surface — the only way renderers touch pixels.
//!
//! RULE: Renderers never call a platform API. They issue primitive
//! calls on a `DrawingSurface`; the platform layer (window, SVG file,
//! printer raster) implements the trait.
//!
//! Coordinates are canvas pixels with y growing downwards. Pie angles
//! are degrees measured from the positive x axis, increasing clockwise
//! on screen, so -90° points straight up.

use crate::{layout::Rect, types::Px};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: Px,
    pub y: Px,
}

impl Point {
    pub fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width:  Px,
    pub height: Px,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::gray(0);
    pub const WHITE: Color = Color::gray(255);

    pub const fn gray(level: u8) -> Self {
        Self { r: level, g: level, b: level }
    }

    /// #rrggbb
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: Px,
}

impl Stroke {
    pub const fn new(color: Color, width: Px) -> Self {
        Self { color, width }
    }

    pub const fn thin(color: Color) -> Self {
        Self::new(color, 1)
    }
}

/// Monochrome hatch styles, in the order pie slices cycle through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HatchPattern {
    ForwardDiagonal,
    BackwardDiagonal,
    Horizontal,
    Vertical,
}

impl HatchPattern {
    pub const ALL: [HatchPattern; 4] = [
        HatchPattern::ForwardDiagonal,
        HatchPattern::BackwardDiagonal,
        HatchPattern::Horizontal,
        HatchPattern::Vertical,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    Solid { color: Color },
    Hatch { pattern: HatchPattern, color: Color },
}

impl Fill {
    pub const fn solid(color: Color) -> Self {
        Fill::Solid { color }
    }

    pub const fn hatch(pattern: HatchPattern) -> Self {
        Fill::Hatch { pattern, color: Color::BLACK }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Point size.
    pub size: u16,
    pub bold: bool,
}

impl TextStyle {
    pub const fn regular(size: u16) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: u16) -> Self {
        Self { size, bold: true }
    }
}

/// Primitive drawing capability provided by the platform layer.
pub trait DrawingSurface {
    fn fill_rect(&mut self, rect: Rect, fill: Fill);

    /// Outline only; the interior is left untouched.
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Connected segments through `points` in order.
    fn draw_polyline(&mut self, points: &[Point], stroke: Stroke) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], stroke);
        }
    }

    fn fill_ellipse(&mut self, bounds: Rect, fill: Fill);

    /// Select the fill used by subsequent `draw_pie` calls.
    fn select_pattern(&mut self, fill: Fill);

    /// Wedge from `start_deg` to `end_deg` (clockwise), filled with the
    /// selected pattern and outlined with `stroke`.
    fn draw_pie(&mut self, center: Point, radius: Px, start_deg: f64, end_deg: f64, stroke: Stroke);

    /// `at` is the top-left corner of the text box.
    fn draw_text(&mut self, at: Point, text: &str, style: TextStyle);

    fn measure_text(&self, text: &str, style: TextStyle) -> Size;
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect { rect: Rect, fill: Fill },
    StrokeRect { rect: Rect, stroke: Stroke },
    Line { from: Point, to: Point, stroke: Stroke },
    Polyline { points: Vec<Point>, stroke: Stroke },
    FillEllipse { bounds: Rect, fill: Fill },
    SelectPattern { fill: Fill },
    Pie { center: Point, radius: Px, start_deg: f64, end_deg: f64, fill: Fill, stroke: Stroke },
    Text { at: Point, text: String, style: TextStyle },
}

/// Approximate advance per character, as a fraction of the point size.
const CHAR_ADVANCE: f64 = 0.55;
const LINE_HEIGHT: f64 = 1.3;

/// Fixed-advance text measurement shared by surfaces without real fonts.
pub fn approximate_text_size(text: &str, style: TextStyle) -> Size {
    let size = f64::from(style.size);
    let weight = if style.bold { 1.08 } else { 1.0 };
    Size {
        width:  (text.chars().count() as f64 * size * CHAR_ADVANCE * weight).round() as Px,
        height: (size * LINE_HEIGHT).round() as Px,
    }
}

/// In-memory surface that keeps every call. Used by tests and by the
/// runner's JSON draw log.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    selected: Fill,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self { commands: Vec::new(), selected: Fill::solid(Color::BLACK) }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// All text drawn so far, in call order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl DrawingSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, fill: Fill) {
        self.commands.push(DrawCommand::FillRect { rect, fill });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.commands.push(DrawCommand::StrokeRect { rect, stroke });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn draw_polyline(&mut self, points: &[Point], stroke: Stroke) {
        self.commands.push(DrawCommand::Polyline { points: points.to_vec(), stroke });
    }

    fn fill_ellipse(&mut self, bounds: Rect, fill: Fill) {
        self.commands.push(DrawCommand::FillEllipse { bounds, fill });
    }

    fn select_pattern(&mut self, fill: Fill) {
        self.selected = fill;
        self.commands.push(DrawCommand::SelectPattern { fill });
    }

    fn draw_pie(&mut self, center: Point, radius: Px, start_deg: f64, end_deg: f64, stroke: Stroke) {
        self.commands.push(DrawCommand::Pie {
            center,
            radius,
            start_deg,
            end_deg,
            fill: self.selected,
            stroke,
        });
    }

    fn draw_text(&mut self, at: Point, text: &str, style: TextStyle) {
        self.commands.push(DrawCommand::Text { at, text: text.to_string(), style });
    }

    fn measure_text(&self, text: &str, style: TextStyle) -> Size {
        approximate_text_size(text, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_uses_selected_pattern() {
        let mut s = RecordingSurface::new();
        s.select_pattern(Fill::hatch(HatchPattern::Vertical));
        s.draw_pie(Point::new(0, 0), 10, -90.0, 0.0, Stroke::thin(Color::BLACK));
        match s.commands().last() {
            Some(DrawCommand::Pie { fill, .. }) => {
                assert_eq!(*fill, Fill::hatch(HatchPattern::Vertical))
            }
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[test]
    fn text_measure_grows_with_length() {
        let style = TextStyle::regular(12);
        let short = approximate_text_size("12.5", style);
        let long = approximate_text_size("123.5", style);
        assert!(long.width > short.width);
        assert_eq!(short.height, long.height);
    }

    #[test]
    fn color_hex() {
        assert_eq!(Color::gray(200).hex(), "#c8c8c8");
    }
}
