//! Layout engine — stacks the six report sections down the canvas.
//!
//! Regions are placed top to bottom in fixed order, each `margin` below
//! the previous one, spanning the canvas width minus both margins.
//! Recompute whenever the canvas size changes.

use crate::{
    error::{ReportError, ReportResult},
    types::Px,
};
use serde::{Deserialize, Serialize};

pub const HEADER_HEIGHT: Px = 190;
pub const LINE_CHART_HEIGHT: Px = 260;
pub const BAR_CHART_HEIGHT: Px = 250;
pub const PIE_CHART_HEIGHT: Px = 300;
pub const TABLE_HEIGHT: Px = 320;
pub const CHECKLIST_HEIGHT: Px = 240;

/// Axis-aligned rectangle in canvas pixels. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x:      Px,
    pub y:      Px,
    pub width:  Px,
    pub height: Px,
}

impl Rect {
    pub fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> Px {
        self.x + self.width
    }

    pub fn bottom(&self) -> Px {
        self.y + self.height
    }

    /// Shrink by `d` on every side.
    pub fn inset(&self, d: Px) -> Self {
        Self::new(self.x + d, self.y + d, self.width - 2 * d, self.height - 2 * d)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regions {
    pub header:    Rect,
    pub line:      Rect,
    pub bar:       Rect,
    pub pie:       Rect,
    pub table:     Rect,
    pub checklist: Rect,
}

impl Regions {
    /// Header → checklist, the order sections are rendered in.
    pub fn in_order(&self) -> [Rect; 6] {
        [self.header, self.line, self.bar, self.pie, self.table, self.checklist]
    }

    /// Lowest pixel row used by any section.
    pub fn content_bottom(&self) -> Px {
        self.checklist.bottom()
    }
}

pub fn compute_regions(canvas_width: Px, canvas_height: Px, margin: Px) -> ReportResult<Regions> {
    compute_regions_with_offset(canvas_width, canvas_height, margin, 0)
}

/// Like `compute_regions`, with the header pushed down by `top_offset`.
pub fn compute_regions_with_offset(
    canvas_width: Px,
    canvas_height: Px,
    margin: Px,
    top_offset: Px,
) -> ReportResult<Regions> {
    if margin <= 0 {
        return Err(ReportError::InvalidMargin { margin });
    }
    let invalid = || ReportError::InvalidCanvas {
        width: canvas_width,
        height: canvas_height,
        margin,
    };
    let width = margin
        .checked_mul(2)
        .and_then(|both| canvas_width.checked_sub(both))
        .ok_or_else(invalid)?;
    if canvas_height <= 0 || width <= 0 {
        return Err(invalid());
    }

    // Every coordinate, including one trailing margin below the
    // checklist, must fit in Px.
    let mut top = top_offset.max(0);
    let mut next = |height: Px| -> ReportResult<Rect> {
        let y = top.checked_add(margin).ok_or_else(invalid)?;
        top = y.checked_add(height).ok_or_else(invalid)?;
        Ok(Rect::new(margin, y, width, height))
    };

    let regions = Regions {
        header:    next(HEADER_HEIGHT)?,
        line:      next(LINE_CHART_HEIGHT)?,
        bar:       next(BAR_CHART_HEIGHT)?,
        pie:       next(PIE_CHART_HEIGHT)?,
        table:     next(TABLE_HEIGHT)?,
        checklist: next(CHECKLIST_HEIGHT)?,
    };
    regions.content_bottom().checked_add(margin).ok_or_else(invalid)?;

    if regions.content_bottom() > canvas_height {
        log::warn!(
            "report content ends at y={} but canvas is only {canvas_height}px tall; lower sections are clipped",
            regions.content_bottom()
        );
    }
    log::debug!("layout {canvas_width}x{canvas_height} margin={margin}: {regions:?}");
    Ok(regions)
}
