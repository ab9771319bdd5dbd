//! report-runner: headless renderer for the daily energy report.
//!
//! Usage:
//!   report-runner --seed 12648430 --date 12.06.2024 --out ./report
//!   report-runner --config report.json --width 800

mod svg;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use energy_report_core::{
    composer::ReportComposer,
    config::ReportConfig,
    export::{EscPosReceipt, JsonExporter, ReportExporter},
    model::format_hour,
    render::evaluate_alerts,
    surface::RecordingSurface,
    EnergyDay,
};
use std::env;
use std::fs;
use std::path::Path;
use svg::SvgSurface;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = build_config(&args)?;
    let out_dir = find_arg(&args, "--out").unwrap_or("./report");
    let today = chrono::Local::now().date_naive();

    println!("Energetický report — report-runner");
    println!("  seed:      {:#x}", config.seed);
    println!("  date:      {}", config.date_or(today).format("%d.%m.%Y"));
    println!("  canvas:    {}x{} (margin {})", config.canvas_width, config.canvas_height, config.margin);
    println!("  out:       {out_dir}");
    println!();

    let composer = ReportComposer::build(config.clone())?;

    // One simulation; the SVG pass redraws the same snapshot.
    let mut recording = RecordingSurface::new();
    let day = composer.compose(today, &mut recording)?;

    let regions = composer.regions()?;
    let svg_height = config.canvas_height.max(regions.content_bottom() + config.margin);
    let mut svg_doc = String::new();
    let mut svg = SvgSurface::new(&mut svg_doc, config.canvas_width, svg_height)?;
    composer.render(&day, &mut svg)?;
    svg.finish()?;

    fs::create_dir_all(out_dir).with_context(|| format!("Cannot create {out_dir}"))?;
    let out = Path::new(out_dir);
    write_file(&out.join("report.svg"), svg_doc.as_bytes())?;
    write_file(&out.join("draw_log.json"), &serde_json::to_vec_pretty(recording.commands())?)?;

    let receipt = EscPosReceipt::default();
    let exporters: [&dyn ReportExporter; 2] = [&JsonExporter, &receipt];
    for exporter in exporters {
        let bytes = exporter.export(&day)?;
        let file = match exporter.name() {
            "escpos" => "receipt.escpos".to_string(),
            name => format!("report.{name}"),
        };
        write_file(&out.join(file), &bytes)?;
    }

    print_summary(&day, recording.commands().len());
    Ok(())
}

fn build_config(args: &[String]) -> Result<ReportConfig> {
    let mut config = match find_arg(args, "--config") {
        Some(path) => ReportConfig::load(path).with_context(|| format!("Loading {path}"))?,
        None => ReportConfig::default(),
    };
    config.seed = parse_arg(args, "--seed", config.seed);
    config.canvas_width = parse_arg(args, "--width", config.canvas_width);
    config.canvas_height = parse_arg(args, "--height", config.canvas_height);
    config.margin = parse_arg(args, "--margin", config.margin);
    if let Some(raw) = find_arg(args, "--date") {
        let date = NaiveDate::parse_from_str(raw, "%d.%m.%Y")
            .with_context(|| format!("--date expects dd.mm.yyyy, got {raw}"))?;
        config.date = Some(date);
    }
    config.validate()?;
    Ok(config)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Cannot write {}", path.display()))?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn print_summary(day: &EnergyDay, commands: usize) {
    let (peak_hour, peak) = day.peak();

    println!("=== REPORT SUMMARY ===");
    println!("  building:       {}", day.building_name);
    println!("  date:           {}", day.formatted_date());
    println!("  total:          {:.1} kWh", day.total_kwh());
    println!("  cost:           {:.0} Kč ({:.2} Kč/kWh)", day.estimated_cost_czk(), day.price_czk_per_kwh);
    println!("  peak:           {peak:.1} kWh @ {}", format_hour(peak_hour));
    println!("  draw commands:  {commands}");

    println!();
    println!("=== CHECKLIST ===");
    for alert in evaluate_alerts(day) {
        println!("  [{}] {}", if alert.ok { "x" } else { "!" }, alert.text);
    }
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
