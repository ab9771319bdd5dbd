//! Pass/fail checklist derived from the hourly curve.

use super::{draw_frame, ReportSection, PAD};
use crate::{
    error::ReportResult,
    layout::Rect,
    model::{Alert, EnergyDay},
    surface::{Color, DrawingSurface, Point, Stroke, TextStyle},
    types::Px,
};

pub const TITLE: &str = "Checklist / Alerts";

/// Night load fails when its average exceeds this share of the daily average.
pub const NIGHT_LOAD_FACTOR: f64 = 0.75;
/// A peak above this multiple of the daily average is extreme.
pub const EXTREME_PEAK_FACTOR: f64 = 2.0;

const ROW_STEP: Px = 26;
const BOX: Px = 12;

/// The five checklist lines, in display order.
pub fn evaluate_alerts(day: &EnergyDay) -> Vec<Alert> {
    let avg = day.average_kwh();
    let (_, peak) = day.peak();
    let night_high = day.night_average_kwh() > avg * NIGHT_LOAD_FACTOR;
    let extreme_peak = peak > avg * EXTREME_PEAK_FACTOR;

    vec![
        Alert::new("Noční zátěž v normě", !night_high),
        Alert::new("Žádná extrémní špička (> 2.0× průměr)", !extreme_peak),
        Alert::new("Křivka bez výpadků (24/24)", day.is_complete()),
        Alert::new("Doporučení: zkontrolovat HVAC plán", true),
        Alert::new("Doporučení: audit osvětlení (zóny)", true),
    ]
}

pub struct ChecklistSection;

impl ReportSection for ChecklistSection {
    fn name(&self) -> &'static str { "checklist" }

    fn render(
        &self,
        day: &EnergyDay,
        region: Rect,
        surface: &mut dyn DrawingSurface,
    ) -> ReportResult<()> {
        draw_frame(surface, region, TITLE);

        let x = region.x + PAD;
        let pen = Stroke::new(Color::BLACK, 2);
        let mut y = region.y + 60;
        for alert in evaluate_alerts(day) {
            surface.stroke_rect(Rect::new(x, y + 2, BOX, BOX), Stroke::thin(Color::BLACK));
            if alert.ok {
                surface.draw_polyline(
                    &[Point::new(x + 2, y + 9), Point::new(x + 5, y + 13), Point::new(x + 11, y + 3)],
                    pen,
                );
            } else {
                surface.draw_line(Point::new(x + 2, y + 3), Point::new(x + 11, y + 13), pen);
                surface.draw_line(Point::new(x + 11, y + 3), Point::new(x + 2, y + 13), pen);
            }
            let style = TextStyle { size: 13, bold: !alert.ok };
            surface.draw_text(Point::new(x + 20, y + 2), &alert.text, style);
            y += ROW_STEP;
        }
        Ok(())
    }
}
