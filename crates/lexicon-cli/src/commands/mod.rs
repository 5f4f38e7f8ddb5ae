pub mod build;
pub mod stats;
pub mod validate;
