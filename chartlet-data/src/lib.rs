pub mod error;
pub mod infer;
pub mod loader;

pub use error::LoaderError;
pub use loader::{load_csv, parse_csv, read_csv, CsvOptions};
