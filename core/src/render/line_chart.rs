//! Hourly time series: scaled y axis, gridlines, hour ticks, the
//! consumption curve and a marked peak.

use super::{draw_frame, draw_text_right, ReportSection, AXIS_STYLE};
use crate::{
    error::ReportResult,
    layout::Rect,
    model::EnergyDay,
    surface::{Color, DrawingSurface, Fill, Point, Stroke},
    types::{Hour, Kwh, Px, HOURS_PER_DAY},
};

pub const TITLE: &str = "Časová osa (kWh/h)";

/// Hours that get a labelled tick under the x axis.
pub const X_TICK_HOURS: [Hour; 5] = [0, 6, 12, 18, 23];

const GRID_STEPS: i32 = 5;
const MIN_AXIS_KWH: Kwh = 10.0;
const AXIS_ROUNDING: Kwh = 5.0;
const PEAK_DOT_RADIUS: Px = 3;

/// Top of the y axis: the larger of 10 and the curve maximum,
/// rounded up to a multiple of 5.
pub fn y_axis_max(values: &[Kwh]) -> Kwh {
    let max = values.iter().copied().fold(MIN_AXIS_KWH, f64::max);
    (max / AXIS_ROUNDING).ceil() * AXIS_ROUNDING
}

/// x pixel for `hour`; hour 0 at the left edge, hour 23 at the right.
pub fn hour_to_x(plot: Rect, hour: Hour) -> Px {
    let offset = i64::from(plot.width) * hour as i64 / (HOURS_PER_DAY as i64 - 1);
    plot.x + offset as Px
}

/// y pixel for `value` on an axis running 0..=`y_max` bottom to top.
pub fn value_to_y(plot: Rect, value: Kwh, y_max: Kwh) -> Px {
    plot.y + (plot.height as f64 * (1.0 - value / y_max)) as Px
}

fn plot_area(region: Rect) -> Rect {
    Rect::new(region.x + 36, region.y + 60, region.width - 36 - 16, 150)
}

pub struct LineChartSection;

impl ReportSection for LineChartSection {
    fn name(&self) -> &'static str { "line_chart" }

    fn render(
        &self,
        day: &EnergyDay,
        region: Rect,
        surface: &mut dyn DrawingSurface,
    ) -> ReportResult<()> {
        draw_frame(surface, region, TITLE);

        let plot = plot_area(region);
        surface.stroke_rect(plot, Stroke::thin(Color::BLACK));

        let y_max = y_axis_max(&day.hourly_kwh);
        let grid = Stroke::thin(Color::gray(200));
        for i in 0..=GRID_STEPS {
            let y = plot.y + plot.height * i / GRID_STEPS;
            surface.draw_line(Point::new(plot.x, y), Point::new(plot.right(), y), grid);
            let label = format!("{:.0}", y_max * (1.0 - f64::from(i) / f64::from(GRID_STEPS)));
            draw_text_right(surface, plot.x - 8, y - 6, &label, AXIS_STYLE);
        }

        let axis = Stroke::thin(Color::BLACK);
        for hour in X_TICK_HOURS {
            let x = hour_to_x(plot, hour);
            surface.draw_line(Point::new(x, plot.bottom()), Point::new(x, plot.bottom() + 4), axis);
            surface.draw_text(Point::new(x - 8, plot.bottom() + 6), &format!("{hour:02}"), AXIS_STYLE);
        }

        if day.hourly_kwh.is_empty() {
            log::debug!("line chart: no hourly samples, curve skipped");
            return Ok(());
        }

        let points: Vec<Point> = day
            .hourly_kwh
            .iter()
            .enumerate()
            .map(|(hour, &v)| Point::new(hour_to_x(plot, hour), value_to_y(plot, v, y_max)))
            .collect();
        surface.draw_polyline(&points, Stroke::new(Color::BLACK, 2));

        let (peak_hour, peak) = day.peak();
        let px = hour_to_x(plot, peak_hour);
        let py = value_to_y(plot, peak, y_max);
        surface.fill_ellipse(
            Rect::new(px - PEAK_DOT_RADIUS, py - PEAK_DOT_RADIUS, 2 * PEAK_DOT_RADIUS, 2 * PEAK_DOT_RADIUS),
            Fill::solid(Color::BLACK),
        );
        surface.draw_text(Point::new(px + 6, py - 10), &format!("peak {peak:.1}"), AXIS_STYLE);
        Ok(())
    }
}
