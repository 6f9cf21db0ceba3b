//! Batch execution request and result.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::credentials::OracleCredentials;
use super::item::NodeExecutionData;
use super::operation::ItemParameters;

/// One host invocation: credentials, resolved parameters per input item, and
/// the failure policy.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    #[validate(nested)]
    pub credentials: OracleCredentials,

    /// Parameter bundle per input item, in input order.
    #[serde(default)]
    pub items: Vec<ItemParameters>,

    /// Convert item failures into `{error}` records instead of aborting.
    #[serde(default)]
    pub continue_on_fail: bool,
}

/// Output batch.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExecuteResult {
    pub items: Vec<NodeExecutionData>,
}
