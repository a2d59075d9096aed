pub mod artifact;
pub mod dataset;
pub mod report;

pub use artifact::{write_bytes_atomic, write_csv_atomic};
pub use dataset::load_dataset;
pub use report::{ColumnMissing, MissingReport, missing_report};
