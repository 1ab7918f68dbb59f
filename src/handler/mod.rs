pub mod aggregator;
pub mod alerts;
pub mod lp_input;
pub mod scorer;
pub mod summary;

pub use aggregator::{generate_report, generate_report_at};
