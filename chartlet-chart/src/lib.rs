pub mod axis;
pub mod chart;
pub mod error;
pub mod marks;

pub use chart::{Chart, ChartGeometry, ChartKind};
pub use error::ChartError;
