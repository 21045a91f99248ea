pub mod estimate;
pub mod report;
