//! Shared primitive types used across the whole report pipeline.

/// Hour of the day, 0..=23.
pub type Hour = usize;

/// Energy in kilowatt-hours.
pub type Kwh = f64;

/// Pixel coordinate on the report canvas.
pub type Px = i32;

/// Samples in one simulated day.
pub const HOURS_PER_DAY: usize = 24;
