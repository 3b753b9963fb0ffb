use chartlet_common::error::{AccessError, DimensionsError};
use chartlet_scales::error::ChartletScaleError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] ChartletScaleError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(#[from] DimensionsError),

    #[error(transparent)]
    Access(#[from] AccessError),
}
