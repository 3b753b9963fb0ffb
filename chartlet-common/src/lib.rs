pub mod accessor;
pub mod dims;
pub mod error;
pub mod record;
pub mod time;
pub mod value;
