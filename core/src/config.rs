//! Report parameters. Every input of a report build lives here;
//! nothing is read from hidden globals.

use crate::{
    error::{ReportError, ReportResult},
    rng::DEFAULT_SEED,
    simulator::{EnergySimulator, DEFAULT_BUILDING_NAME, DEFAULT_PRICE_CZK_PER_KWH},
    types::Px,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CANVAS_WIDTH: Px = 600;
pub const DEFAULT_CANVAS_HEIGHT: Px = 1100;
pub const DEFAULT_MARGIN: Px = 10;
/// Strip above the header kept free for the platform's print button.
pub const DEFAULT_TOP_OFFSET: Px = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub seed:              u64,
    /// None means "today" and is resolved by the caller.
    pub date:              Option<NaiveDate>,
    pub building_name:     String,
    pub price_czk_per_kwh: f64,
    pub canvas_width:      Px,
    pub canvas_height:     Px,
    pub margin:            Px,
    pub top_offset:        Px,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            seed:              DEFAULT_SEED,
            date:              None,
            building_name:     DEFAULT_BUILDING_NAME.to_string(),
            price_czk_per_kwh: DEFAULT_PRICE_CZK_PER_KWH,
            canvas_width:      DEFAULT_CANVAS_WIDTH,
            canvas_height:     DEFAULT_CANVAS_HEIGHT,
            margin:            DEFAULT_MARGIN,
            top_offset:        DEFAULT_TOP_OFFSET,
        }
    }
}

impl ReportConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("loaded report config from {}", path.display());
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config with a pinned date for use in tests.
    pub fn default_test() -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(2024, 6, 12),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_canvas(mut self, width: Px, height: Px) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn validate(&self) -> ReportResult<()> {
        if !(self.price_czk_per_kwh > 0.0) {
            return Err(ReportError::InvalidConfig {
                field:  "price_czk_per_kwh",
                reason: format!("must be > 0, got {}", self.price_czk_per_kwh),
            });
        }
        if self.canvas_width <= 0 || self.canvas_height <= 0 {
            return Err(ReportError::InvalidConfig {
                field:  "canvas",
                reason: format!("{}x{} is empty", self.canvas_width, self.canvas_height),
            });
        }
        if self.margin <= 0 {
            return Err(ReportError::InvalidConfig {
                field:  "margin",
                reason: format!("must be > 0, got {}", self.margin),
            });
        }
        if self.top_offset < 0 {
            return Err(ReportError::InvalidConfig {
                field:  "top_offset",
                reason: format!("must be >= 0, got {}", self.top_offset),
            });
        }
        Ok(())
    }

    /// The report date, falling back to `today` when unset.
    pub fn date_or(&self, today: NaiveDate) -> NaiveDate {
        self.date.unwrap_or(today)
    }

    pub fn simulator(&self) -> EnergySimulator {
        EnergySimulator::new(self.building_name.clone(), self.price_czk_per_kwh)
    }
}
