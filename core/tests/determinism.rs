//! THE MOST IMPORTANT TEST IN THE PROJECT.
//!
//! Two builds, same seed, same date.
//! They must produce byte-identical snapshots and draw logs.
//! Any divergence is a blocker — do not merge until fixed.

use chrono::NaiveDate;
use energy_report_core::{
    composer::ReportComposer,
    config::ReportConfig,
    simulate,
    surface::RecordingSurface,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
}

fn draw_log(seed: u64) -> Vec<String> {
    let config = ReportConfig::default_test().with_seed(seed);
    let composer = ReportComposer::build(config).expect("composer");
    let mut surface = RecordingSurface::new();
    composer.compose(date(), &mut surface).expect("compose");
    surface
        .commands()
        .iter()
        .map(|c| serde_json::to_string(c).expect("serialize command"))
        .collect()
}

#[test]
fn same_seed_produces_identical_snapshots() {
    const SEED: u64 = 0xC0FFEE;

    let a = simulate(SEED, date()).expect("day a");
    let b = simulate(SEED, date()).expect("day b");

    let json_a = serde_json::to_string(&a).unwrap();
    let json_b = serde_json::to_string(&b).unwrap();
    assert_eq!(json_a, json_b, "Snapshots diverged for the same seed");

    for (h, (x, y)) in a.hourly_kwh.iter().zip(&b.hourly_kwh).enumerate() {
        assert_eq!(x.to_bits(), y.to_bits(), "Hour {h} differs at bit level: {x} vs {y}");
    }
}

#[test]
fn same_seed_produces_identical_draw_logs() {
    let log_a = draw_log(0xDEAD_BEEF_CAFE_1234);
    let log_b = draw_log(0xDEAD_BEEF_CAFE_1234);

    assert_eq!(
        log_a.len(), log_b.len(),
        "Draw log lengths differ: {} vs {}",
        log_a.len(), log_b.len()
    );

    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate() {
        assert_eq!(a, b, "Draw log diverged at entry {i}:\n  A: {a}\n  B: {b}");
    }
}

#[test]
fn different_seeds_produce_different_days() {
    let a = simulate(42, date()).unwrap();
    let b = simulate(99, date()).unwrap();

    let any_different = a.hourly_kwh.iter().zip(&b.hourly_kwh).any(|(x, y)| x != y);
    assert!(any_different, "Different seeds produced identical curves — seed is not being used");
}
