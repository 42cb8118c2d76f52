mod export;
mod summary;
pub mod views;

pub use export::{export_csv, ReportError};
pub use summary::ProjectReport;
