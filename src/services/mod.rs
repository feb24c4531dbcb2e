pub mod aggregate;
pub mod cache;
pub mod fetch;
pub mod report;
