//! SVG rendering of the report through plotters' SVG backend, the
//! headless stand-in for a window.
//!
//! Hatch fills are drawn as clipped line strokes, so the document needs
//! no pattern defs. The first backend error is kept and returned by
//! `finish()`.

use anyhow::{Context, Result};
use energy_report_core::{
    layout::Rect,
    surface::{
        approximate_text_size, Color, DrawingSurface, Fill, HatchPattern, Point, Size, Stroke,
        TextStyle,
    },
    types::Px,
};
use plotters::backend::{DrawingBackend, SVGBackend};
use plotters::style::{
    Color as _, FontDesc, FontFamily, FontStyle, RGBColor, ShapeStyle, TextStyle as PlotTextStyle,
};
use std::cell::RefCell;

/// Pixels between parallel hatch strokes.
const HATCH_SPACING: i32 = 6;
/// Arc resolution for wedges and ellipses.
const ARC_STEP_DEG: f64 = 3.0;

type Segment = ((i32, i32), (i32, i32));

pub struct SvgSurface<'a> {
    backend:  SVGBackend<'a>,
    selected: Fill,
    error:    RefCell<Option<anyhow::Error>>,
}

impl<'a> SvgSurface<'a> {
    /// Surface writing into `buf`; the document is complete once `finish()` returns.
    pub fn new(buf: &'a mut String, width: Px, height: Px) -> Result<Self> {
        let size = (
            u32::try_from(width).with_context(|| format!("svg width {width}"))?,
            u32::try_from(height).with_context(|| format!("svg height {height}"))?,
        );
        Ok(Self {
            backend:  SVGBackend::with_string(buf, size),
            selected: Fill::solid(Color::BLACK),
            error:    RefCell::new(None),
        })
    }

    /// Flush the document, or return the first error any draw call hit.
    pub fn finish(mut self) -> Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.backend.present().context("svg backend: present")?;
        Ok(())
    }

    fn check<T, E>(&self, what: &str, result: std::result::Result<T, E>) -> Option<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let mut slot = self.error.borrow_mut();
                if slot.is_none() {
                    *slot = Some(anyhow::Error::new(e).context(format!("svg backend: {what}")));
                }
                None
            }
        }
    }

    /// Paint the interior of `outline` with `fill`. `inside` clips hatch
    /// strokes to the same area within `bounds`.
    fn fill_area(
        &mut self,
        outline: Vec<(i32, i32)>,
        bounds: Rect,
        fill: Fill,
        inside: impl Fn(i32, i32) -> bool,
    ) {
        let base = match fill {
            Fill::Solid { color } => color,
            Fill::Hatch { .. } => Color::WHITE,
        };
        let result = self.backend.fill_polygon(outline, &solid(base));
        self.check("fill polygon", result);

        if let Fill::Hatch { pattern, color } = fill {
            let style = outline_style(Stroke::thin(color));
            for (from, to) in hatch_segments(bounds, pattern, inside) {
                let result = self.backend.draw_line(from, to, &style);
                self.check("hatch line", result);
            }
        }
    }
}

fn rgb(color: Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn solid(color: Color) -> ShapeStyle {
    ShapeStyle { color: rgb(color).to_rgba(), filled: true, stroke_width: 0 }
}

fn outline_style(stroke: Stroke) -> ShapeStyle {
    ShapeStyle {
        color:        rgb(stroke.color).to_rgba(),
        filled:       false,
        stroke_width: stroke.width.max(1) as u32,
    }
}

fn font(style: TextStyle) -> PlotTextStyle<'static> {
    let weight = if style.bold { FontStyle::Bold } else { FontStyle::Normal };
    PlotTextStyle::from(FontDesc::new(FontFamily::SansSerif, f64::from(style.size), weight))
}

fn polar(center: Point, radius: f64, deg: f64) -> (i32, i32) {
    let rad = deg.to_radians();
    (
        (f64::from(center.x) + radius * rad.cos()).round() as i32,
        (f64::from(center.y) + radius * rad.sin()).round() as i32,
    )
}

/// Closed wedge outline: centre, then the arc from `start_deg` clockwise.
/// A full turn omits the centre and traces the whole circle.
pub(crate) fn wedge_outline(center: Point, radius: Px, start_deg: f64, end_deg: f64) -> Vec<(i32, i32)> {
    let sweep = (end_deg - start_deg).clamp(0.0, 360.0);
    let steps = (sweep / ARC_STEP_DEG).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    if sweep < 360.0 {
        points.push((center.x, center.y));
    }
    for i in 0..=steps {
        let deg = start_deg + sweep * i as f64 / steps as f64;
        points.push(polar(center, f64::from(radius), deg));
    }
    points
}

pub(crate) fn in_sector(center: Point, radius: Px, start_deg: f64, end_deg: f64, x: i32, y: i32) -> bool {
    let dx = f64::from(x - center.x);
    let dy = f64::from(y - center.y);
    let r = f64::from(radius);
    if dx * dx + dy * dy > r * r {
        return false;
    }
    let sweep = end_deg - start_deg;
    if sweep >= 360.0 {
        return true;
    }
    (dy.atan2(dx).to_degrees() - start_deg).rem_euclid(360.0) <= sweep
}

/// Parallel strokes for `pattern` across `bounds`, keeping only the runs
/// of pixels for which `inside` holds.
pub(crate) fn hatch_segments(
    bounds: Rect,
    pattern: HatchPattern,
    inside: impl Fn(i32, i32) -> bool,
) -> Vec<Segment> {
    let (left, top, right, bottom) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
    // (first line, end of lines, first step, end of steps, point on line c at step t)
    let (c_lo, c_hi, t_lo, t_hi, at): (i32, i32, i32, i32, fn(i32, i32) -> (i32, i32)) = match pattern {
        HatchPattern::Horizontal       => (top, bottom, left, right, |c, t| (t, c)),
        HatchPattern::Vertical         => (left, right, top, bottom, |c, t| (c, t)),
        HatchPattern::ForwardDiagonal  => (left + top, right + bottom, left, right, |c, t| (t, c - t)),
        HatchPattern::BackwardDiagonal => (top - right, bottom - left, left, right, |c, t| (t, t + c)),
    };
    let covered = |(x, y): (i32, i32)| x >= left && x < right && y >= top && y < bottom && inside(x, y);

    let mut segments = Vec::new();
    let mut flush = |run: Option<Segment>| {
        if let Some((from, to)) = run {
            if from != to {
                segments.push((from, to));
            }
        }
    };
    for c in (c_lo..c_hi).step_by(HATCH_SPACING as usize) {
        let mut run: Option<Segment> = None;
        for t in t_lo..t_hi {
            let p = at(c, t);
            if covered(p) {
                run = Some(match run {
                    Some((from, _)) => (from, p),
                    None => (p, p),
                });
            } else {
                flush(run.take());
            }
        }
        flush(run);
    }
    segments
}

impl DrawingSurface for SvgSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, fill: Fill) {
        match fill {
            Fill::Solid { color } => {
                let result = self.backend.draw_rect(
                    (rect.x, rect.y),
                    (rect.right(), rect.bottom()),
                    &solid(color),
                    true,
                );
                self.check("fill rect", result);
            }
            Fill::Hatch { .. } => {
                let outline = vec![
                    (rect.x, rect.y),
                    (rect.right(), rect.y),
                    (rect.right(), rect.bottom()),
                    (rect.x, rect.bottom()),
                ];
                self.fill_area(outline, rect, fill, |_, _| true);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        let result = self.backend.draw_rect(
            (rect.x, rect.y),
            (rect.right(), rect.bottom()),
            &outline_style(stroke),
            false,
        );
        self.check("stroke rect", result);
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        let result = self.backend.draw_line((from.x, from.y), (to.x, to.y), &outline_style(stroke));
        self.check("line", result);
    }

    fn draw_polyline(&mut self, points: &[Point], stroke: Stroke) {
        let path: Vec<(i32, i32)> = points.iter().map(|p| (p.x, p.y)).collect();
        let result = self.backend.draw_path(path, &outline_style(stroke));
        self.check("polyline", result);
    }

    fn fill_ellipse(&mut self, bounds: Rect, fill: Fill) {
        let center = Point::new(bounds.x + bounds.width / 2, bounds.y + bounds.height / 2);
        if let (Fill::Solid { color }, true) = (fill, bounds.width == bounds.height) {
            let radius = (bounds.width / 2).max(0) as u32;
            let result = self.backend.draw_circle((center.x, center.y), radius, &solid(color), true);
            self.check("circle", result);
            return;
        }

        let (rx, ry) = (f64::from(bounds.width) / 2.0, f64::from(bounds.height) / 2.0);
        let steps = (360.0 / ARC_STEP_DEG) as usize;
        let outline = (0..steps)
            .map(|i| {
                let rad = (i as f64 * ARC_STEP_DEG).to_radians();
                (
                    (f64::from(center.x) + rx * rad.cos()).round() as i32,
                    (f64::from(center.y) + ry * rad.sin()).round() as i32,
                )
            })
            .collect();
        self.fill_area(outline, bounds, fill, |x, y| {
            let nx = f64::from(x - center.x) / rx;
            let ny = f64::from(y - center.y) / ry;
            nx * nx + ny * ny <= 1.0
        });
    }

    fn select_pattern(&mut self, fill: Fill) {
        self.selected = fill;
    }

    fn draw_pie(&mut self, center: Point, radius: Px, start_deg: f64, end_deg: f64, stroke: Stroke) {
        let outline = wedge_outline(center, radius, start_deg, end_deg);
        let bounds = Rect::new(center.x - radius, center.y - radius, 2 * radius + 1, 2 * radius + 1);
        self.fill_area(outline.clone(), bounds, self.selected, |x, y| {
            in_sector(center, radius, start_deg, end_deg, x, y)
        });

        let mut closed = outline;
        if let Some(&first) = closed.first() {
            closed.push(first);
        }
        let result = self.backend.draw_path(closed, &outline_style(stroke));
        self.check("wedge outline", result);
    }

    fn draw_text(&mut self, at: Point, text: &str, style: TextStyle) {
        // Default text anchor is the top-left corner, matching `at`.
        let result = self.backend.draw_text(text, &font(style), (at.x, at.y));
        self.check("text", result);
    }

    fn measure_text(&self, text: &str, style: TextStyle) -> Size {
        let estimate = self.backend.estimate_text_size(text, &font(style));
        match self.check("measure text", estimate) {
            Some((width, height)) => Size {
                width:  Px::try_from(width).unwrap_or(Px::MAX),
                height: Px::try_from(height).unwrap_or(Px::MAX),
            },
            None => approximate_text_size(text, style),
        }
    }
}
