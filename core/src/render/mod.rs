//! Section renderers.
//!
//! RULE: Every section implements ReportSection. A section reads the
//! EnergyDay, draws inside its own region, and keeps no state between
//! calls. Sections never see each other.

mod bar_chart;
mod checklist;
mod header;
mod line_chart;
mod pie_chart;
mod table;

pub use bar_chart::{bar_fill_width, BarChartSection};
pub use checklist::{evaluate_alerts, ChecklistSection, EXTREME_PEAK_FACTOR, NIGHT_LOAD_FACTOR};
pub use header::HeaderSection;
pub use line_chart::{hour_to_x, value_to_y, y_axis_max, LineChartSection, X_TICK_HOURS};
pub use pie_chart::{pattern_for, pie_slices, PieChartSection, PieSlice};
pub use table::{top_hours, HourRow, TableSection, PEAK_ROW_FACTOR, TABLE_ROWS};

use crate::{
    error::ReportResult,
    layout::Rect,
    model::EnergyDay,
    surface::{Color, DrawingSurface, Fill, Point, Stroke, TextStyle},
    types::Px,
};

/// The contract every report section fulfils.
pub trait ReportSection {
    /// Unique stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Draw this section of `day` inside `region`.
    fn render(
        &self,
        day: &EnergyDay,
        region: Rect,
        surface: &mut dyn DrawingSurface,
    ) -> ReportResult<()>;
}

pub(crate) const TITLE_STYLE: TextStyle = TextStyle::bold(18);
pub(crate) const BODY_STYLE: TextStyle = TextStyle::regular(12);
pub(crate) const AXIS_STYLE: TextStyle = TextStyle::regular(10);

/// Horizontal padding inside a region.
pub(crate) const PAD: Px = 10;
/// y offset of the rule under a section title.
const TITLE_RULE_Y: Px = 36;

/// White background, bold title and the rule beneath it.
pub(crate) fn draw_frame(surface: &mut dyn DrawingSurface, region: Rect, title: &str) {
    surface.fill_rect(region, Fill::solid(Color::WHITE));
    surface.draw_text(Point::new(region.x + PAD, region.y + PAD), title, TITLE_STYLE);
    rule(surface, region, region.y + TITLE_RULE_Y, Color::BLACK);
}

/// Full-width separator at `y`, padded on both sides.
pub(crate) fn rule(surface: &mut dyn DrawingSurface, region: Rect, y: Px, color: Color) {
    surface.draw_line(
        Point::new(region.x + PAD, y),
        Point::new(region.right() - PAD, y),
        Stroke::thin(color),
    );
}

/// Draw `text` so that it ends at `right`.
pub(crate) fn draw_text_right(
    surface: &mut dyn DrawingSurface,
    right: Px,
    y: Px,
    text: &str,
    style: TextStyle,
) {
    let size = surface.measure_text(text, style);
    surface.draw_text(Point::new(right - size.width, y), text, style);
}
