//! Per-item operation parameters.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::parameters::QueryParameter;

/// Query run when the user has not typed one.
pub const DEFAULT_QUERY: &str = "SELECT SYSDATE FROM DUAL";

/// Operation selected on the node.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    #[default]
    ExecuteQuery,
    Insert,
    Update,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::ExecuteQuery => "executeQuery",
            OperationKind::Insert => "insert",
            OperationKind::Update => "update",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active operation for one item, carrying only the fields it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ExecuteQuery {
        query: String,
    },
    Insert {
        table: String,
        columns: String,
        values: String,
    },
    Update {
        table: String,
        set_clause: String,
        where_clause: String,
    },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::ExecuteQuery { .. } => OperationKind::ExecuteQuery,
            Operation::Insert { .. } => OperationKind::Insert,
            Operation::Update { .. } => OperationKind::Update,
        }
    }
}

/// Parameter values the host resolved for a single input item.
///
/// Mirrors the node form: every field is present, and `operation` decides
/// which of them are read.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemParameters {
    #[serde(default)]
    pub operation: OperationKind,

    #[serde(default = "default_query")]
    pub query: String,

    #[serde(default)]
    pub table: String,

    #[serde(default)]
    pub columns: String,

    #[serde(default)]
    pub values: String,

    #[serde(default)]
    pub set_clause: String,

    #[serde(default)]
    pub where_clause: String,

    /// Ordered `(name, value)` list; later duplicates win.
    #[serde(default)]
    pub parameters: Vec<QueryParameter>,
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

impl Default for ItemParameters {
    fn default() -> Self {
        Self {
            operation: OperationKind::default(),
            query: default_query(),
            table: String::new(),
            columns: String::new(),
            values: String::new(),
            set_clause: String::new(),
            where_clause: String::new(),
            parameters: Vec::new(),
        }
    }
}

impl ItemParameters {
    /// Picks the variant selected by `operation`.
    pub fn resolve(&self) -> Operation {
        match self.operation {
            OperationKind::ExecuteQuery => Operation::ExecuteQuery {
                query: self.query.clone(),
            },
            OperationKind::Insert => Operation::Insert {
                table: self.table.clone(),
                columns: self.columns.clone(),
                values: self.values.clone(),
            },
            OperationKind::Update => Operation::Update {
                table: self.table.clone(),
                set_clause: self.set_clause.clone(),
                where_clause: self.where_clause.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_sysdate_query() {
        let item: ItemParameters = serde_json::from_str("{}").unwrap();
        assert_eq!(
            item.resolve(),
            Operation::ExecuteQuery {
                query: DEFAULT_QUERY.into()
            }
        );
    }

    #[test]
    fn test_resolve_ignores_fields_of_other_operations() {
        let item: ItemParameters = serde_json::from_value(serde_json::json!({
            "operation": "update",
            "query": "SELECT 1 FROM DUAL",
            "table": "EMP",
            "columns": "ignored",
            "setClause": "SAL = :sal",
            "whereClause": "EMPNO = :id"
        }))
        .unwrap();
        assert_eq!(
            item.resolve(),
            Operation::Update {
                table: "EMP".into(),
                set_clause: "SAL = :sal".into(),
                where_clause: "EMPNO = :id".into(),
            }
        );
        assert_eq!(item.resolve().kind().to_string(), "update");
    }

    #[test]
    fn test_unknown_operation_is_rejected() {
        let parsed = serde_json::from_str::<ItemParameters>(r#"{"operation":"delete"}"#);
        assert!(parsed.is_err());
    }
}
