use super::{draw_frame, draw_text_right, rule, ReportSection, BODY_STYLE, PAD};
use crate::{
    error::ReportResult,
    layout::Rect,
    model::EnergyDay,
    simulator::TOP_CONSUMER_COUNT,
    surface::{Color, DrawingSurface, Fill, Point, Stroke},
    types::{Kwh, Px},
};

pub const TITLE: &str = "Top spotřebiče (kWh/den)";

const ROWS_TOP: Px = 60;
const LABEL_COLUMN: Px = 160;
const BAR_HEIGHT: Px = 18;
const ROW_STEP: Px = 28;

/// Filled pixels for a bar of `kwh` when `max` fills `full_width`.
pub fn bar_fill_width(kwh: Kwh, max: Kwh, full_width: Px) -> Px {
    if !(max > 0.0) {
        return 0;
    }
    ((f64::from(full_width) * (kwh / max)) as Px).clamp(0, full_width)
}

/// Horizontal bars for the ranked consumers, longest first.
pub struct BarChartSection;

impl ReportSection for BarChartSection {
    fn name(&self) -> &'static str { "bar_chart" }

    fn render(
        &self,
        day: &EnergyDay,
        region: Rect,
        surface: &mut dyn DrawingSurface,
    ) -> ReportResult<()> {
        draw_frame(surface, region, TITLE);

        let rows: Vec<_> = day.top_consumers.iter().take(TOP_CONSUMER_COUNT).collect();
        let max = rows.iter().map(|c| c.kwh).fold(0.0, f64::max);

        let label_x = region.x + PAD;
        let bar_x = label_x + LABEL_COLUMN;
        let bar_w = region.right() - PAD - bar_x;
        let outline = Stroke::thin(Color::BLACK);

        let mut y = region.y + ROWS_TOP;
        for (i, consumer) in rows.iter().enumerate() {
            surface.draw_text(Point::new(label_x, y + 2), &consumer.name, BODY_STYLE);
            surface.stroke_rect(Rect::new(bar_x, y, bar_w, BAR_HEIGHT), outline);
            let filled = bar_fill_width(consumer.kwh, max, bar_w);
            if filled > 0 {
                surface.fill_rect(Rect::new(bar_x, y, filled, BAR_HEIGHT), Fill::solid(Color::BLACK));
            }
            draw_text_right(surface, region.right() - PAD, y + 2, &format!("{:.1}", consumer.kwh), BODY_STYLE);

            if i + 1 < rows.len() {
                rule(surface, region, y + 26, Color::gray(210));
            }
            y += ROW_STEP;
        }
        Ok(())
    }
}
