//! Utility functions and helpers.

pub mod sql_builder;

// Re-export commonly used types
pub use sql_builder::SqlBuilder;
