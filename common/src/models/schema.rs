//! Declarative property descriptors.
//!
//! The host renders credential and node forms from these descriptors; nothing
//! here has behavior beyond construction.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Input widget kind.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    String,
    Number,
    Options,
    FixedCollection,
}

/// One selectable option of an `options` property.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PropertyOption {
    /// Label shown to the user.
    pub name: String,
    /// Value stored in the parameter.
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Action label used by the host's node picker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl PropertyOption {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            description: None,
            action: None,
        }
    }

    pub fn describe(mut self, description: &str, action: &str) -> Self {
        self.description = Some(description.to_string());
        self.action = Some(action.to_string());
        self
    }
}

/// Group of fields repeated inside a `fixedCollection`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionGroup {
    pub name: String,
    pub display_name: String,
    #[schema(no_recursion)]
    pub values: Vec<PropertyDescriptor>,
}

/// Extra rendering hints.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_values: Option<bool>,
}

/// A single form field.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub default: Value,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub collection: Vec<CollectionGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    /// Operations for which the field is shown. Empty means always.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub show_for_operations: Vec<String>,
    /// Whether the field may not be bound to an expression.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_data_expression: bool,
}

impl PropertyDescriptor {
    /// Creates a descriptor with the given name, kind and default.
    pub fn new(display_name: &str, name: &str, kind: PropertyType, default: Value) -> Self {
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            kind,
            default,
            required: false,
            placeholder: None,
            description: None,
            options: Vec::new(),
            collection: Vec::new(),
            type_options: None,
            show_for_operations: Vec::new(),
            no_data_expression: false,
        }
    }

    /// Shorthand for a string field.
    pub fn string(display_name: &str, name: &str, default: &str) -> Self {
        Self::new(display_name, name, PropertyType::String, Value::from(default))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn options(mut self, options: Vec<PropertyOption>) -> Self {
        self.options = options;
        self
    }

    pub fn collection(mut self, groups: Vec<CollectionGroup>) -> Self {
        self.collection = groups;
        self
    }

    pub fn type_options(mut self, type_options: TypeOptions) -> Self {
        self.type_options = Some(type_options);
        self
    }

    pub fn show_for(mut self, operations: &[&str]) -> Self {
        self.show_for_operations = operations.iter().map(|op| op.to_string()).collect();
        self
    }

    pub fn no_data_expression(mut self) -> Self {
        self.no_data_expression = true;
        self
    }
}
