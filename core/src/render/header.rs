use super::{draw_frame, ReportSection, BODY_STYLE, PAD};
use crate::{
    error::ReportResult,
    layout::Rect,
    model::{format_hour, EnergyDay},
    surface::{Color, DrawingSurface, Point, Stroke, TextStyle},
};

pub const TITLE: &str = "Denní energetický report";

const SUMMARY_TOP: i32 = 96;
const SUMMARY_HEIGHT: i32 = 78;

/// Title, building, date and the total/cost/peak summary box.
pub struct HeaderSection;

impl ReportSection for HeaderSection {
    fn name(&self) -> &'static str { "header" }

    fn render(
        &self,
        day: &EnergyDay,
        region: Rect,
        surface: &mut dyn DrawingSurface,
    ) -> ReportResult<()> {
        draw_frame(surface, region, TITLE);

        let left = region.x + PAD;
        surface.draw_text(Point::new(left, region.y + 50), &day.building_name, TextStyle::bold(14));
        surface.draw_text(
            Point::new(left, region.y + 72),
            &format!("Datum: {}", day.formatted_date()),
            BODY_STYLE,
        );

        let summary = Rect::new(left, region.y + SUMMARY_TOP, region.width - 2 * PAD, SUMMARY_HEIGHT);
        surface.stroke_rect(summary, Stroke::thin(Color::BLACK));

        let (peak_hour, peak) = day.peak();
        let lines = [
            (format!("Celkem: {:.1} kWh", day.total_kwh()), TextStyle::bold(14)),
            (
                format!(
                    "Odhad nákladů: {:.0} Kč ({:.2} Kč/kWh)",
                    day.estimated_cost_czk(),
                    day.price_czk_per_kwh
                ),
                BODY_STYLE,
            ),
            (format!("Špička: {peak:.1} kWh @ {}", format_hour(peak_hour)), BODY_STYLE),
        ];
        let text_box = summary.inset(PAD);
        for (i, (text, style)) in lines.iter().enumerate() {
            surface.draw_text(Point::new(text_box.x, text_box.y + 20 * i as i32), text, *style);
        }
        Ok(())
    }
}
