//! Node description: the operation parameter form the host renders.

use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use super::credentials::CREDENTIAL_TYPE_NAME;
use super::operation::{OperationKind, DEFAULT_QUERY};
use super::schema::{
    CollectionGroup, PropertyDescriptor, PropertyOption, PropertyType, TypeOptions,
};

/// Credential requirement declared by the node.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NodeCredential {
    pub name: String,
    pub required: bool,
}

/// Static description of the node.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub icon: String,
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    pub defaults: Value,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub credentials: Vec<NodeCredential>,
    pub properties: Vec<PropertyDescriptor>,
}

/// Returns the Oracle 11g node description.
pub fn node_description() -> NodeDescription {
    let insert = OperationKind::Insert.as_str();
    let update = OperationKind::Update.as_str();

    NodeDescription {
        display_name: "Oracle 11g Database".to_string(),
        name: "oracle11g".to_string(),
        icon: "file:oracle.svg".to_string(),
        group: vec!["input".to_string(), "output".to_string()],
        version: 1,
        description: "Execute SQL queries on Oracle 11g database".to_string(),
        defaults: json!({ "name": "Oracle 11g" }),
        inputs: vec!["main".to_string()],
        outputs: vec!["main".to_string()],
        credentials: vec![NodeCredential {
            name: CREDENTIAL_TYPE_NAME.to_string(),
            required: true,
        }],
        properties: vec![
            PropertyDescriptor::new(
                "Operation",
                "operation",
                PropertyType::Options,
                Value::from(OperationKind::ExecuteQuery.as_str()),
            )
            .no_data_expression()
            .options(vec![
                PropertyOption::new("Execute Query", OperationKind::ExecuteQuery.as_str())
                    .describe("Execute a SQL query and return results", "Execute a SQL query"),
                PropertyOption::new("Insert", insert)
                    .describe("Insert data into table", "Insert data into table"),
                PropertyOption::new("Update", update)
                    .describe("Update data in table", "Update data in table"),
            ]),
            PropertyDescriptor::string("Query", "query", DEFAULT_QUERY)
                .show_for(&[OperationKind::ExecuteQuery.as_str()])
                .type_options(TypeOptions {
                    editor: Some("sqlEditor".to_string()),
                    rows: Some(5),
                    ..Default::default()
                })
                .placeholder("SELECT * FROM your_table WHERE condition = :value")
                .description("SQL query to execute. Use :paramName for parameters."),
            PropertyDescriptor::string("Table", "table", "")
                .show_for(&[insert, update])
                .placeholder("TABLE_NAME")
                .description("Name of the table"),
            PropertyDescriptor::string("Columns", "columns", "")
                .show_for(&[insert])
                .placeholder("column1, column2, column3")
                .description("Comma-separated list of column names"),
            PropertyDescriptor::string("Values", "values", "")
                .show_for(&[insert])
                .placeholder(":value1, :value2, :value3")
                .description("Comma-separated list of values (use :paramName for parameters)"),
            PropertyDescriptor::string("Set Clause", "setClause", "")
                .show_for(&[update])
                .placeholder("column1 = :value1, column2 = :value2")
                .description("SET clause for UPDATE (use :paramName for parameters)"),
            PropertyDescriptor::string("Where Clause", "whereClause", "")
                .show_for(&[update])
                .placeholder("id = :id")
                .description("WHERE clause for UPDATE (use :paramName for parameters)"),
            PropertyDescriptor::new(
                "Parameters",
                "parameters",
                PropertyType::FixedCollection,
                json!({}),
            )
            .type_options(TypeOptions {
                multiple_values: Some(true),
                ..Default::default()
            })
            .placeholder("Add Parameter")
            .description("Parameters for the SQL query")
            .collection(vec![CollectionGroup {
                name: "parameter".to_string(),
                display_name: "Parameter".to_string(),
                values: vec![
                    PropertyDescriptor::string("Name", "name", "")
                        .placeholder("paramName")
                        .description("Parameter name (without :)"),
                    PropertyDescriptor::string("Value", "value", "")
                        .description("Parameter value"),
                ],
            }]),
        ],
    }
}
