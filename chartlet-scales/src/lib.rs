pub mod aggregate;
pub mod array;
pub mod bin;
pub mod color;
pub mod domain;
pub mod error;
pub mod extent;
pub mod formatter;
pub mod numeric;
pub mod temporal;

pub use aggregate::{max_bin_len, mean};
pub use bin::{bin, Bin, Binner};
pub use domain::{Domain, ScaleRange};
pub use error::ChartletScaleError;
pub use extent::extent;
pub use numeric::linear::{make_linear_scale, LinearScale};
pub use numeric::{ContinuousScale, ScaleOptions};
pub use temporal::timestamp::{make_temporal_scale, TimeScale};
