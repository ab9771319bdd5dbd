//! Category pie. Slices start at the top (-90°) and run clockwise in
//! declared category order; hatch patterns cycle by slice index.

use super::{draw_frame, ReportSection, BODY_STYLE, AXIS_STYLE};
use crate::{
    error::ReportResult,
    layout::Rect,
    model::EnergyDay,
    surface::{Color, DrawingSurface, Fill, HatchPattern, Point, Stroke},
    types::Px,
};
use serde::Serialize;

pub const TITLE: &str = "Rozpad kategorií (podíl)";
pub const LEGEND_NOTE: &str = "Pozn.: vzory = index 1..N";

const START_DEG: f64 = -90.0;
const RADIUS: Px = 70;
const SWATCH: Px = 12;
const LEGEND_ROW: Px = 22;

/// Hatch pattern for slice `index`; patterns repeat once exhausted.
pub fn pattern_for(index: usize) -> HatchPattern {
    HatchPattern::ALL[index % HatchPattern::ALL.len()]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub index:     usize,
    pub name:      String,
    /// Fraction of the category total, 0..=1.
    pub share:     f64,
    pub start_deg: f64,
    pub end_deg:   f64,
    pub pattern:   HatchPattern,
}

impl PieSlice {
    pub fn sweep_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }
}

/// Angular layout of the category breakdown. Empty when the categories
/// sum to zero, since no share can be computed.
pub fn pie_slices(day: &EnergyDay) -> Vec<PieSlice> {
    let total = day.category_total_kwh();
    if !(total > 0.0) {
        return Vec::new();
    }
    let mut angle = START_DEG;
    day.category_breakdown
        .iter()
        .enumerate()
        .map(|(index, cat)| {
            let share = cat.kwh / total;
            let start = angle;
            angle += share * 360.0;
            PieSlice {
                index,
                name: cat.name.clone(),
                share,
                start_deg: start,
                end_deg: angle,
                pattern: pattern_for(index),
            }
        })
        .collect()
}

pub struct PieChartSection;

impl ReportSection for PieChartSection {
    fn name(&self) -> &'static str { "pie_chart" }

    fn render(
        &self,
        day: &EnergyDay,
        region: Rect,
        surface: &mut dyn DrawingSurface,
    ) -> ReportResult<()> {
        draw_frame(surface, region, TITLE);

        let slices = pie_slices(day);
        if slices.is_empty() {
            log::debug!("pie chart: category total is zero, nothing to draw");
            return Ok(());
        }

        let center = Point::new(region.x + 100, region.y + 170);
        let outline = Stroke::thin(Color::BLACK);
        for slice in &slices {
            surface.select_pattern(Fill::hatch(slice.pattern));
            surface.draw_pie(center, RADIUS, slice.start_deg, slice.end_deg, outline);
        }

        let swatch_x = region.x + 200;
        let mut y = region.y + 90;
        for slice in &slices {
            let swatch = Rect::new(swatch_x, y, SWATCH, SWATCH);
            surface.fill_rect(swatch, Fill::hatch(slice.pattern));
            surface.stroke_rect(swatch, outline);
            surface.draw_text(
                Point::new(swatch_x + SWATCH + 6, y - 1),
                &format!("{}) {}  {:.0}%", slice.index + 1, slice.name, slice.share * 100.0),
                BODY_STYLE,
            );
            y += LEGEND_ROW;
        }
        surface.draw_text(Point::new(swatch_x, y + 4), LEGEND_NOTE, AXIS_STYLE);
        Ok(())
    }
}
