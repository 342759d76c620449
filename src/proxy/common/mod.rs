// Common module - shared helpers

pub mod summary;
pub mod utils;
