//! Shared building blocks for the Oracle 11g workflow node.
//!
//! Holds the declarative credential and node schemas, the per-item operation
//! models, SQL and connect-string construction, and the error/config/response
//! types used by the service crate.

pub mod config;
pub mod errors;
pub mod models;
pub mod response;
pub mod utils;
