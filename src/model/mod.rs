pub mod resource;
pub mod stats;
