pub mod csv;
pub mod json;

pub use self::csv::{write_samples, write_samples_file};
pub use self::json::{write_summary, write_summary_file, RunDocument};
