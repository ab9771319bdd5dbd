//! Section renderers and the composer, observed through a recording surface.

use chrono::NaiveDate;
use energy_report_core::{
    compose,
    composer::{ReportComposer, SectionSlot},
    config::ReportConfig,
    layout::Rect,
    model::{Category, Consumer, EnergyDay},
    render::{
        bar_fill_width, pattern_for, pie_slices, top_hours, BarChartSection, HeaderSection,
        LineChartSection, PieChartSection, ReportSection, TableSection, X_TICK_HOURS,
    },
    rng::DEFAULT_SEED,
    surface::{Color, DrawCommand, DrawingSurface, Fill, HatchPattern, RecordingSurface, Stroke},
    ReportError, ReportResult,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
}

fn region() -> Rect {
    Rect::new(10, 10, 580, 300)
}

/// A flat 5 kWh day with a 20 kWh spike at 09:00 and 14:00.
fn sample_day() -> EnergyDay {
    let mut hourly = vec![5.0; 24];
    hourly[9] = 20.0;
    hourly[14] = 20.0;
    EnergyDay {
        building_name:      "Testovací budova".into(),
        date:               date(),
        hourly_kwh:         hourly,
        category_breakdown: vec![
            Category { name: "A".into(), kwh: 50.0 },
            Category { name: "B".into(), kwh: 25.0 },
            Category { name: "C".into(), kwh: 12.5 },
            Category { name: "D".into(), kwh: 7.5 },
            Category { name: "E".into(), kwh: 5.0 },
        ],
        top_consumers:      vec![
            Consumer { name: "Chiller".into(), kwh: 40.0 },
            Consumer { name: "VZT".into(), kwh: 20.0 },
            Consumer { name: "Výtahy".into(), kwh: 10.0 },
        ],
        price_czk_per_kwh:  3.0,
    }
}

fn render(section: &dyn ReportSection, day: &EnergyDay) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    section.render(day, region(), &mut surface).expect("render");
    surface
}

#[test]
fn header_shows_summary_figures() {
    let surface = render(&HeaderSection, &sample_day());
    // total = 22*5 + 2*20 = 150, cost = 450
    assert!(surface.contains_text("Denní energetický report"));
    assert!(surface.contains_text("Testovací budova"));
    assert!(surface.contains_text("Datum: 12.06.2024"));
    assert!(surface.contains_text("Celkem: 150.0 kWh"));
    assert!(surface.contains_text("Odhad nákladů: 450 Kč (3.00 Kč/kWh)"));
    assert!(surface.contains_text("Špička: 20.0 kWh @ 09:00"), "earliest peak hour wins");
}

#[test]
fn line_chart_connects_all_hours_and_marks_peak() {
    let surface = render(&LineChartSection, &sample_day());

    let polylines: Vec<&Vec<_>> = surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Polyline { points, .. } => Some(points),
            _ => None,
        })
        .collect();
    assert_eq!(polylines.len(), 1);
    let points = polylines[0];
    assert_eq!(points.len(), 24);
    assert!(points.windows(2).all(|p| p[0].x < p[1].x), "points must run in hour order");

    let gridlines = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { stroke, .. } if *stroke == Stroke::thin(Color::gray(200))))
        .count();
    assert_eq!(gridlines, 6);

    // y axis tops out at 20 (max 20 rounded to a multiple of 5).
    for label in ["20", "16", "12", "8", "4", "0"] {
        assert!(surface.texts().contains(&label), "missing grid label {label}");
    }
    for hour in X_TICK_HOURS {
        let label = format!("{hour:02}");
        assert!(surface.texts().contains(&label.as_str()), "missing tick {label}");
    }

    let dots = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillEllipse { .. }))
        .count();
    assert_eq!(dots, 1);
    assert!(surface.contains_text("peak 20.0"));
}

#[test]
fn bar_chart_renders_only_existing_rows() {
    let day = sample_day();
    let surface = render(&BarChartSection, &day);

    let outlines: Vec<Rect> = surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::StrokeRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();
    assert_eq!(outlines.len(), 3);

    let fills: Vec<Rect> = surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::FillRect { rect, fill: Fill::Solid { color } } if *color == Color::BLACK => Some(*rect),
            _ => None,
        })
        .collect();
    assert_eq!(fills.len(), 3);
    let full = outlines[0].width;
    assert_eq!(fills[0].width, full, "largest consumer fills its bar");
    assert_eq!(fills[1].width, bar_fill_width(20.0, 40.0, full));
    assert_eq!(fills[2].width, full / 4);

    for value in ["40.0", "20.0", "10.0"] {
        assert!(surface.texts().contains(&value));
    }

    let separators = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { stroke, .. } if stroke.color == Color::gray(210)))
        .count();
    assert_eq!(separators, 2, "separators only between rows");
}

#[test]
fn bar_values_are_right_aligned() {
    let surface = render(&BarChartSection, &sample_day());
    let right_edge = region().right() - 10;
    for c in surface.commands() {
        if let DrawCommand::Text { at, text, style } = c {
            if text == "40.0" {
                let width = energy_report_core::surface::approximate_text_size(text, *style).width;
                assert_eq!(at.x + width, right_edge);
            }
        }
    }
}

#[test]
fn pie_slices_start_at_top_and_cover_full_circle() {
    let slices = pie_slices(&sample_day());
    assert_eq!(slices.len(), 5);
    assert_eq!(slices[0].start_deg, -90.0);
    assert!((slices[0].sweep_deg() - 180.0).abs() < 1e-9);
    for pair in slices.windows(2) {
        assert_eq!(pair[0].end_deg, pair[1].start_deg, "slices must be contiguous");
    }
    assert!((slices[4].end_deg - 270.0).abs() < 1e-9);
    let total_share: f64 = slices.iter().map(|s| s.share).sum();
    assert!((total_share - 1.0).abs() < 1e-12);
}

#[test]
fn pie_patterns_cycle_every_four_slices() {
    assert_eq!(pattern_for(0), HatchPattern::ForwardDiagonal);
    assert_eq!(pattern_for(3), HatchPattern::Vertical);
    assert_eq!(pattern_for(4), pattern_for(0));

    let surface = render(&PieChartSection, &sample_day());
    let wedge_fills: Vec<Fill> = surface
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Pie { fill, .. } => Some(*fill),
            _ => None,
        })
        .collect();
    let expected: Vec<Fill> = (0..5).map(|i| Fill::hatch(pattern_for(i))).collect();
    assert_eq!(wedge_fills, expected);

    assert!(surface.contains_text("1) A  50%"));
    assert!(surface.contains_text("5) E  5%"));
    assert!(surface.contains_text("Pozn.: vzory = index 1..N"));
}

#[test]
fn pie_with_zero_total_draws_no_wedges() {
    let mut day = sample_day();
    for cat in &mut day.category_breakdown {
        cat.kwh = 0.0;
    }
    assert!(pie_slices(&day).is_empty());
    let surface = render(&PieChartSection, &day);
    assert!(!surface.commands().iter().any(|c| matches!(c, DrawCommand::Pie { .. })));
}

#[test]
fn table_lists_ten_heaviest_hours() {
    let day = sample_day();
    let rows = top_hours(&day, 10);
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].hour, 9, "ties resolve to the earlier hour");
    assert_eq!(rows[1].hour, 14);
    // Remaining rows are the flat 5 kWh hours in hour order.
    let rest: Vec<usize> = rows[2..].iter().map(|r| r.hour).collect();
    assert_eq!(rest, vec![0, 1, 2, 3, 4, 5, 6, 7]);

    // average = 150 / 24 = 6.25, peak threshold 9.375
    assert!(rows[0].peak && rows[1].peak);
    assert!(rows[2..].iter().all(|r| !r.peak));
    assert_eq!(rows[0].cost_czk, 60.0);

    let surface = render(&TableSection, &day);
    assert!(surface.contains_text("Průměr: 6.2 kWh/h   Cena: 3.00 Kč/kWh")
        || surface.contains_text("Průměr: 6.3 kWh/h   Cena: 3.00 Kč/kWh"));
    assert!(surface.texts().contains(&"09:00"));
    assert_eq!(surface.texts().iter().filter(|t| **t == "peak").count(), 2);
    assert!(surface.contains_text("Tip: nejvyšší hodiny"));
}

#[test]
fn composer_renders_sections_in_fixed_order() {
    let composer = ReportComposer::build(ReportConfig::default_test()).unwrap();
    assert_eq!(
        composer.section_names(),
        ["header", "line_chart", "bar_chart", "pie_chart", "table", "checklist"]
    );

    let mut surface = RecordingSurface::new();
    let day = composer.compose(date(), &mut surface).unwrap();
    assert_eq!(day.date, date());

    let titles = [
        "Denní energetický report",
        "Časová osa (kWh/h)",
        "Top spotřebiče (kWh/den)",
        "Rozpad kategorií (podíl)",
        "Tabulka (výběr hodin)",
        "Checklist / Alerts",
    ];
    let texts = surface.texts();
    let positions: Vec<usize> = titles
        .iter()
        .map(|t| texts.iter().position(|x| x == t).unwrap_or_else(|| panic!("missing title {t}")))
        .collect();
    assert!(positions.windows(2).all(|p| p[0] < p[1]), "titles out of order: {positions:?}");
}

#[test]
fn composer_returns_the_snapshot_it_drew() {
    let mut surface = RecordingSurface::new();
    let day = compose(DEFAULT_SEED, date(), 600, 1100, &mut surface).unwrap();
    let expected = energy_report_core::simulate(DEFAULT_SEED, date()).unwrap();
    assert_eq!(day, expected);
    assert!(surface.contains_text(&format!("Celkem: {:.1} kWh", expected.total_kwh())));
}

#[test]
fn composer_uses_config_date_over_today() {
    let pinned = NaiveDate::from_ymd_opt(2023, 12, 24).unwrap();
    let config = ReportConfig::default_test().with_date(pinned);
    let composer = ReportComposer::build(config).unwrap();
    let mut surface = RecordingSurface::new();
    let day = composer.compose(date(), &mut surface).unwrap();
    assert_eq!(day.date, pinned);
    assert!(surface.contains_text("Datum: 24.12.2023"));
}

#[test]
fn composer_rejects_invalid_canvas() {
    let config = ReportConfig::default_test().with_canvas(15, 1100);
    let composer = ReportComposer::build(config).unwrap();
    let mut surface = RecordingSurface::new();
    assert!(composer.compose(date(), &mut surface).is_err());
    assert!(surface.commands().is_empty(), "nothing drawn on failure");
}

#[test]
fn composer_rejects_canvas_beyond_pixel_range() {
    let config: ReportConfig =
        serde_json::from_str(r#"{ "canvas_width": 2000000000, "margin": 400000000 }"#).unwrap();
    assert!(config.validate().is_ok());

    let composer = ReportComposer::build(config).unwrap();
    let mut surface = RecordingSurface::new();
    let result = composer.compose(date(), &mut surface);
    assert!(matches!(result, Err(ReportError::InvalidCanvas { .. })), "{result:?}");
    assert!(surface.commands().is_empty());
}

/// A section supplied from outside the crate, failing with its own error.
struct OfflineSection;

impl ReportSection for OfflineSection {
    fn name(&self) -> &'static str { "offline" }

    fn render(&self, _: &EnergyDay, _: Rect, _: &mut dyn DrawingSurface) -> ReportResult<()> {
        Err(anyhow::anyhow!("label printer offline").into())
    }
}

#[test]
fn custom_section_errors_reach_the_caller() {
    let mut composer = ReportComposer::new(ReportConfig::default_test());
    composer.register(SectionSlot::Header, Box::new(OfflineSection));
    assert_eq!(composer.section_names(), ["offline"]);

    let mut surface = RecordingSurface::new();
    match composer.compose(date(), &mut surface) {
        Err(ReportError::Other(e)) => assert_eq!(e.to_string(), "label printer offline"),
        other => panic!("expected Other, got {other:?}"),
    }
}
