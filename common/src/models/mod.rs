//! Shared data models.

pub mod credentials;
pub mod execute;
pub mod item;
pub mod node;
pub mod operation;
pub mod parameters;
pub mod schema;

// Re-export commonly used types
pub use credentials::{credential_type, ConnectionType, CredentialType, OracleCredentials};
pub use execute::{ExecuteRequest, ExecuteResult};
pub use item::{NodeExecutionData, OperationSummary, PairedItem, RowObject};
pub use node::{node_description, NodeDescription};
pub use operation::{ItemParameters, Operation, OperationKind};
pub use parameters::{BindParams, BindValue, QueryParameter};
