//! Energy data simulator — builds one EnergyDay from a seed.
//!
//! DRAW ORDER (fixed, documented, never reordered). For each hour 0..24:
//!   1. noise      — one draw, mapped to [-1, 1)
//!   2. spike roll — one draw, spike fires when < SPIKE_PROBABILITY
//!   3. spike size — one draw, ONLY when the roll fired, mapped to [5, 15)
//!
//! Categories and consumers are fixed shares of the daily total and
//! consume no draws. Drawing the spike size unconditionally would shift
//! every later hour, so the conditional third draw must stay.

use crate::{
    error::{ReportError, ReportResult},
    model::{Category, Consumer, EnergyDay},
    rng::ReportRng,
    types::{Hour, Kwh, HOURS_PER_DAY},
};
use chrono::NaiveDate;
use std::f64::consts::PI;

pub const DEFAULT_BUILDING_NAME: &str = "Kancelářská budova A (menší)";
pub const DEFAULT_PRICE_CZK_PER_KWH: f64 = 3.20;

const BASE_NIGHT: Kwh = 6.5;
const BASE_MORNING: Kwh = BASE_NIGHT + 3.0;
const BASE_WORK: Kwh = 16.0;
const BASE_EVENING: Kwh = 10.0;
const WAVE_AMPLITUDE: Kwh = 7.0;
const SPIKE_PROBABILITY: f64 = 0.08;
const SPIKE_MIN: Kwh = 5.0;
const SPIKE_SPAN: Kwh = 10.0;

/// No hour ever reports less than this.
pub const HOURLY_FLOOR_KWH: Kwh = 3.0;

/// Category shares in display order. Sum to 1.0.
pub const CATEGORY_SHARES: [(&str, f64); 5] = [
    ("HVAC (chlazení + VZT)", 0.42),
    ("Osvětlení",             0.22),
    ("IT + serverovna",       0.18),
    ("Zásuvky / kuchyňky",    0.10),
    ("Ostatní",               0.08),
];

/// Raw consumer shares before ranking.
pub const CONSUMER_SHARES: [(&str, f64); 7] = [
    ("Chiller / tepelné čerpadlo", 0.22),
    ("VZT jednotky",               0.17),
    ("Osvětlení open-space",       0.15),
    ("Serverovna UPS",             0.14),
    ("EV nabíjení",                0.10),
    ("Výtahy",                     0.05),
    ("Ostatní",                    0.17),
];

/// Entries kept after ranking consumers.
pub const TOP_CONSUMER_COUNT: usize = 6;

/// Deterministic base load by time-of-day band.
pub fn base_load(hour: Hour) -> Kwh {
    match hour {
        h if h < 6 || h >= 23 => BASE_NIGHT,
        h if h < 8            => BASE_MORNING,
        h if h <= 18          => BASE_WORK,
        _                     => BASE_EVENING,
    }
}

/// Workday sine hump over hours 8–18, zero elsewhere.
pub fn workday_wave(hour: Hour) -> Kwh {
    if (8..=18).contains(&hour) {
        WAVE_AMPLITUDE * ((hour as f64 - 8.0) / 10.0 * PI).sin()
    } else {
        0.0
    }
}

/// Generate the 24 hourly samples, consuming `rng` in the documented order.
pub fn hourly_profile(rng: &mut ReportRng) -> Vec<Kwh> {
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let noise = (rng.next_f64() - 0.5) * 2.0;
            let spike = if rng.chance(SPIKE_PROBABILITY) {
                rng.next_in(SPIKE_MIN, SPIKE_MIN + SPIKE_SPAN)
            } else {
                0.0
            };
            (base_load(hour) + workday_wave(hour) + noise + spike).max(HOURLY_FLOOR_KWH)
        })
        .collect()
}

/// Split `total` by fixed shares, preserving declaration order.
pub fn split_by_shares(total: Kwh, shares: &[(&str, f64)]) -> ReportResult<Vec<(String, Kwh)>> {
    if !(total > 0.0) {
        return Err(ReportError::DegenerateDay { total });
    }
    Ok(shares
        .iter()
        .map(|(name, share)| (name.to_string(), total * share))
        .collect())
}

/// Stable descending sort by kWh, truncated to `n`.
/// Equal consumers keep their original relative order.
pub fn rank_top_consumers(mut raw: Vec<Consumer>, n: usize) -> Vec<Consumer> {
    raw.sort_by(|a, b| b.kwh.total_cmp(&a.kwh));
    raw.truncate(n);
    raw
}

/// Static parameters of a simulated building.
#[derive(Debug, Clone)]
pub struct EnergySimulator {
    pub building_name:     String,
    pub price_czk_per_kwh: f64,
}

impl Default for EnergySimulator {
    fn default() -> Self {
        Self {
            building_name:     DEFAULT_BUILDING_NAME.to_string(),
            price_czk_per_kwh: DEFAULT_PRICE_CZK_PER_KWH,
        }
    }
}

impl EnergySimulator {
    pub fn new(building_name: impl Into<String>, price_czk_per_kwh: f64) -> Self {
        Self { building_name: building_name.into(), price_czk_per_kwh }
    }

    /// Build one day. The generator lives and dies inside this call.
    pub fn simulate(&self, seed: u64, date: NaiveDate) -> ReportResult<EnergyDay> {
        let mut rng = ReportRng::new(seed);
        let hourly_kwh = hourly_profile(&mut rng);
        let total: Kwh = hourly_kwh.iter().sum();

        let category_breakdown = split_by_shares(total, &CATEGORY_SHARES)?
            .into_iter()
            .map(|(name, kwh)| Category { name, kwh })
            .collect();

        let raw_consumers = split_by_shares(total, &CONSUMER_SHARES)?
            .into_iter()
            .map(|(name, kwh)| Consumer { name, kwh })
            .collect();
        let top_consumers = rank_top_consumers(raw_consumers, TOP_CONSUMER_COUNT);

        log::debug!(
            "seed={seed:#x} simulated {}: total={total:.2} kWh, rng state={:#x}",
            date,
            rng.state()
        );

        Ok(EnergyDay {
            building_name: self.building_name.clone(),
            date,
            hourly_kwh,
            category_breakdown,
            top_consumers,
            price_czk_per_kwh: self.price_czk_per_kwh,
        })
    }
}

/// Simulate with the reference building and price.
pub fn simulate(seed: u64, date: NaiveDate) -> ReportResult<EnergyDay> {
    EnergySimulator::default().simulate(seed, date)
}
