use super::{draw_frame, rule, ReportSection, BODY_STYLE, PAD};
use crate::{
    error::ReportResult,
    layout::Rect,
    model::{format_hour, EnergyDay},
    surface::{Color, DrawingSurface, Point},
    types::{Hour, Kwh, Px},
};
use serde::Serialize;

pub const TITLE: &str = "Tabulka (výběr hodin)";
pub const FOOTER_TIP: &str = "Tip: nejvyšší hodiny často souvisí s HVAC/EV.";

/// Rows shown in the table.
pub const TABLE_ROWS: usize = 10;
/// An hour above this multiple of the daily average is annotated "peak".
pub const PEAK_ROW_FACTOR: f64 = 1.5;

const COLUMNS: [Px; 4] = [0, 70, 150, 270];
const ROW_STEP: Px = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRow {
    pub hour:     Hour,
    pub kwh:      Kwh,
    pub cost_czk: f64,
    pub peak:     bool,
}

/// The `n` heaviest hours, descending; equal hours keep the earlier first.
pub fn top_hours(day: &EnergyDay, n: usize) -> Vec<HourRow> {
    let avg = day.average_kwh();
    let mut rows: Vec<HourRow> = day
        .hourly_kwh
        .iter()
        .enumerate()
        .map(|(hour, &kwh)| HourRow {
            hour,
            kwh,
            cost_czk: kwh * day.price_czk_per_kwh,
            peak: kwh > avg * PEAK_ROW_FACTOR,
        })
        .collect();
    rows.sort_by(|a, b| b.kwh.total_cmp(&a.kwh));
    rows.truncate(n);
    rows
}

/// The ten heaviest hours with cost and peak annotation.
pub struct TableSection;

impl ReportSection for TableSection {
    fn name(&self) -> &'static str { "table" }

    fn render(
        &self,
        day: &EnergyDay,
        region: Rect,
        surface: &mut dyn DrawingSurface,
    ) -> ReportResult<()> {
        draw_frame(surface, region, TITLE);

        let left = region.x + PAD;
        surface.draw_text(
            Point::new(left, region.y + 50),
            &format!(
                "Průměr: {:.1} kWh/h   Cena: {:.2} Kč/kWh",
                day.average_kwh(),
                day.price_czk_per_kwh
            ),
            BODY_STYLE,
        );

        let header_y = region.y + 68;
        for (col, label) in COLUMNS.iter().zip(["Hod", "kWh", "Kč", "Pozn."]) {
            surface.draw_text(Point::new(left + col, header_y), label, BODY_STYLE);
        }
        rule(surface, region, header_y + 18, Color::BLACK);

        let rows = top_hours(day, TABLE_ROWS);
        let mut y = region.y + 92;
        for (i, row) in rows.iter().enumerate() {
            let cells = [
                format_hour(row.hour),
                format!("{:.1}", row.kwh),
                format!("{:.0}", row.cost_czk),
                if row.peak { "peak".to_string() } else { String::new() },
            ];
            for (col, text) in COLUMNS.iter().zip(cells.iter()) {
                if !text.is_empty() {
                    surface.draw_text(Point::new(left + col, y), text, BODY_STYLE);
                }
            }
            if i + 1 < rows.len() {
                rule(surface, region, y + 18, Color::gray(220));
            }
            y += ROW_STEP;
        }

        surface.draw_text(Point::new(left, region.bottom() - 20), FOOTER_TIP, BODY_STYLE);
        Ok(())
    }
}
