//! Output records returned to the host.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::operation::OperationKind;

/// A database row keyed by column name, in column order.
pub type RowObject = Map<String, Value>;

/// Back-reference to the input item that produced a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct PairedItem {
    pub item: usize,
}

/// Result of an insert/update, or of a statement that returned no row set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationSummary {
    pub operation: OperationKind,
    pub rows_affected: u64,
    pub success: bool,
}

/// One record of the output batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeExecutionData {
    /// Row, summary or `{error}` object.
    pub json: Value,
    pub paired_item: PairedItem,
}

impl NodeExecutionData {
    /// Record for one fetched row.
    pub fn row(row: RowObject, item: usize) -> Self {
        Self {
            json: Value::Object(row),
            paired_item: PairedItem { item },
        }
    }

    /// Success summary for a statement without a row set.
    pub fn summary(operation: OperationKind, rows_affected: u64, item: usize) -> Self {
        let summary = OperationSummary {
            operation,
            rows_affected,
            success: true,
        };
        Self {
            json: serde_json::to_value(summary).unwrap_or(Value::Null),
            paired_item: PairedItem { item },
        }
    }

    /// Record emitted in place of a failed item.
    pub fn error(message: impl Into<String>, item: usize) -> Self {
        let mut json = Map::new();
        json.insert("error".to_string(), Value::String(message.into()));
        Self {
            json: Value::Object(json),
            paired_item: PairedItem { item },
        }
    }

    pub fn is_error(&self) -> bool {
        self.json.get("error").is_some()
    }
}
