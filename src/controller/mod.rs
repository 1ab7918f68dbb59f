//! API Controller modules

pub mod report;
pub mod status;
