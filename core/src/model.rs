//! The report snapshot — one simulated day, read by every renderer.
//!
//! RULE: An EnergyDay is built once by the simulator and never mutated
//! afterwards. Renderers take `&EnergyDay`; derived figures (totals,
//! peaks, alerts) are recomputed from it on demand.

use crate::types::{Hour, Kwh, HOURS_PER_DAY};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tracked load (chiller, lifts, ...) with its daily consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumer {
    pub name: String,
    pub kwh:  Kwh,
}

/// A fixed-share slice of the daily total (HVAC, lighting, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub kwh:  Kwh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyDay {
    pub building_name:       String,
    pub date:                NaiveDate,
    /// One sample per hour, index = hour of day.
    pub hourly_kwh:          Vec<Kwh>,
    /// Declared category order; shares sum to the daily total.
    pub category_breakdown:  Vec<Category>,
    /// Sorted descending by kWh.
    pub top_consumers:       Vec<Consumer>,
    pub price_czk_per_kwh:   f64,
}

impl EnergyDay {
    pub fn total_kwh(&self) -> Kwh {
        self.hourly_kwh.iter().sum()
    }

    /// Mean hourly consumption over a full day (total / 24).
    pub fn average_kwh(&self) -> Kwh {
        self.total_kwh() / HOURS_PER_DAY as f64
    }

    /// First hour attaining the maximum, with its value.
    /// An empty curve reports (0, 0.0).
    pub fn peak(&self) -> (Hour, Kwh) {
        self.hourly_kwh
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0), |best, (h, v)| if v > best.1 { (h, v) } else { best })
    }

    /// Mean of hours 0–5. Missing samples count as zero.
    pub fn night_average_kwh(&self) -> Kwh {
        self.hourly_kwh.iter().take(NIGHT_HOURS).sum::<Kwh>() / NIGHT_HOURS as f64
    }

    pub fn estimated_cost_czk(&self) -> f64 {
        self.total_kwh() * self.price_czk_per_kwh
    }

    pub fn category_total_kwh(&self) -> Kwh {
        self.category_breakdown.iter().map(|c| c.kwh).sum()
    }

    /// True when the curve has exactly one sample per hour.
    pub fn is_complete(&self) -> bool {
        self.hourly_kwh.len() == HOURS_PER_DAY
    }

    /// Report date as dd.mm.yyyy.
    pub fn formatted_date(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }
}

/// Hours 0..NIGHT_HOURS form the night window used by the checklist.
pub const NIGHT_HOURS: usize = 6;

/// A derived pass/fail line shown in the checklist. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub text: String,
    pub ok:   bool,
}

impl Alert {
    pub fn new(text: impl Into<String>, ok: bool) -> Self {
        Self { text: text.into(), ok }
    }
}

/// Format an hour as HH:00.
pub fn format_hour(hour: Hour) -> String {
    format!("{hour:02}:00")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_with(hourly: Vec<Kwh>) -> EnergyDay {
        EnergyDay {
            building_name:      "Test".into(),
            date:               NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            hourly_kwh:         hourly,
            category_breakdown: vec![],
            top_consumers:      vec![],
            price_czk_per_kwh:  2.0,
        }
    }

    #[test]
    fn peak_prefers_earliest_hour_on_ties() {
        let mut hourly = vec![5.0; 24];
        hourly[7] = 20.0;
        hourly[15] = 20.0;
        assert_eq!(day_with(hourly).peak(), (7, 20.0));
    }

    #[test]
    fn derived_totals() {
        let day = day_with(vec![4.0; 24]);
        assert_eq!(day.total_kwh(), 96.0);
        assert_eq!(day.average_kwh(), 4.0);
        assert_eq!(day.night_average_kwh(), 4.0);
        assert_eq!(day.estimated_cost_czk(), 192.0);
        assert!(day.is_complete());
    }

    #[test]
    fn date_and_hour_formatting() {
        let day = day_with(vec![]);
        assert_eq!(day.formatted_date(), "05.03.2024");
        assert_eq!(format_hour(7), "07:00");
        assert_eq!(format_hour(23), "23:00");
    }
}
