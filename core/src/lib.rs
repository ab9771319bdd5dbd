//! Daily building energy report: a seeded simulator that produces one
//! day of consumption data, and a renderer that lays the report out in
//! six stacked sections on any `DrawingSurface`.
//!
//! DATA FLOW (one way only):
//!   ReportRng → simulator → EnergyDay → {layout, render} → DrawingSurface
//!
//! Nothing downstream of the simulator mutates the EnergyDay.

pub mod composer;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod render;
pub mod rng;
pub mod simulator;
pub mod surface;
pub mod types;

pub use composer::{compose, ReportComposer};
pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use model::{Alert, Category, Consumer, EnergyDay};
pub use simulator::{simulate, EnergySimulator};
