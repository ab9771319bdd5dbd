//! The report composer — builds one EnergyDay and draws every section.
//!
//! RENDER ORDER (fixed, documented, never reordered):
//!   1. Header
//!   2. Line chart
//!   3. Bar chart
//!   4. Pie chart
//!   5. Table
//!   6. Checklist
//!
//! RULES:
//!   - The EnergyDay is simulated exactly once per compose() call.
//!   - Every section gets the same snapshot, read-only.
//!   - Regions are recomputed on every call, so canvas changes apply
//!     on the next compose().

use crate::{
    config::ReportConfig,
    error::ReportResult,
    layout::{compute_regions_with_offset, Rect, Regions},
    model::EnergyDay,
    render::{
        BarChartSection, ChecklistSection, HeaderSection, LineChartSection, PieChartSection,
        ReportSection, TableSection,
    },
    surface::{Color, DrawingSurface, Fill},
    types::Px,
};
use chrono::NaiveDate;

/// Slot a section occupies in the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionSlot {
    Header,
    LineChart,
    BarChart,
    PieChart,
    Table,
    Checklist,
}

impl SectionSlot {
    pub fn region(&self, regions: &Regions) -> Rect {
        match self {
            Self::Header    => regions.header,
            Self::LineChart => regions.line,
            Self::BarChart  => regions.bar,
            Self::PieChart  => regions.pie,
            Self::Table     => regions.table,
            Self::Checklist => regions.checklist,
        }
    }
}

pub struct ReportComposer {
    pub config: ReportConfig,
    sections:   Vec<(SectionSlot, Box<dyn ReportSection>)>,
}

impl ReportComposer {
    /// An empty composer. Most callers want `build()`.
    pub fn new(config: ReportConfig) -> Self {
        Self { config, sections: Vec::new() }
    }

    /// Composer with all six sections registered in render order.
    pub fn build(config: ReportConfig) -> ReportResult<Self> {
        config.validate()?;
        let mut composer = Self::new(config);
        composer.register(SectionSlot::Header, Box::new(HeaderSection));
        composer.register(SectionSlot::LineChart, Box::new(LineChartSection));
        composer.register(SectionSlot::BarChart, Box::new(BarChartSection));
        composer.register(SectionSlot::PieChart, Box::new(PieChartSection));
        composer.register(SectionSlot::Table, Box::new(TableSection));
        composer.register(SectionSlot::Checklist, Box::new(ChecklistSection));
        Ok(composer)
    }

    /// Register a section. Call in the documented render order.
    pub fn register(&mut self, slot: SectionSlot, section: Box<dyn ReportSection>) {
        self.sections.push((slot, section));
    }

    pub fn section_names(&self) -> Vec<&'static str> {
        self.sections.iter().map(|(_, s)| s.name()).collect()
    }

    pub fn regions(&self) -> ReportResult<Regions> {
        compute_regions_with_offset(
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.margin,
            self.config.top_offset,
        )
    }

    /// Simulate the configured day and draw the report. `today` is used
    /// when the config pins no date. Returns the snapshot that was drawn.
    pub fn compose(
        &self,
        today: NaiveDate,
        surface: &mut dyn DrawingSurface,
    ) -> ReportResult<EnergyDay> {
        let day = self
            .config
            .simulator()
            .simulate(self.config.seed, self.config.date_or(today))?;
        self.render(&day, surface)?;
        log::info!(
            "report for {} composed: seed={:#x} total={:.1} kWh",
            day.formatted_date(),
            self.config.seed,
            day.total_kwh()
        );
        Ok(day)
    }

    /// Draw an existing snapshot onto `surface`.
    pub fn render(&self, day: &EnergyDay, surface: &mut dyn DrawingSurface) -> ReportResult<()> {
        let regions = self.regions()?;
        surface.fill_rect(
            Rect::new(0, 0, self.config.canvas_width, self.config.canvas_height.max(regions.content_bottom())),
            Fill::solid(Color::WHITE),
        );
        for (slot, section) in &self.sections {
            let region = slot.region(&regions);
            log::debug!("rendering {} into {region:?}", section.name());
            section.render(day, region, surface)?;
        }
        Ok(())
    }
}

/// Build and draw a report in one call.
pub fn compose(
    seed: u64,
    date: NaiveDate,
    canvas_width: Px,
    canvas_height: Px,
    surface: &mut dyn DrawingSurface,
) -> ReportResult<EnergyDay> {
    let config = ReportConfig::default()
        .with_seed(seed)
        .with_date(date)
        .with_canvas(canvas_width, canvas_height);
    ReportComposer::build(config)?.compose(date, surface)
}
