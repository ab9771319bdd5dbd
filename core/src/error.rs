use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid canvas {width}x{height} for margin {margin}")]
    InvalidCanvas { width: i32, height: i32, margin: i32 },

    #[error("Invalid margin: {margin} (must be > 0)")]
    InvalidMargin { margin: i32 },

    #[error("Degenerate day: total consumption {total} kWh is not strictly positive")]
    DegenerateDay { total: f64 },

    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
