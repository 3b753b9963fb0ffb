use chartlet_common::error::AccessError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartletScaleError {
    #[error("Empty domain")]
    EmptyDomain,

    #[error("Bin count must be positive, got {0}")]
    InvalidBinCount(usize),

    #[error("Domain minimum {0} exceeds its maximum {1}")]
    InvertedDomain(f64, f64),

    #[error("Cannot subdivide zero-width domain at {0}")]
    DegenerateDomain(f64),

    #[error("Empty input")]
    EmptyInput,

    #[error("Non-finite value: {0}")]
    NonFiniteValue(f64),

    #[error("Color range must contain at least one color")]
    EmptyRange,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error(transparent)]
    Access(#[from] AccessError),
}
