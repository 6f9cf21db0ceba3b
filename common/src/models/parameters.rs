//! Bind parameters.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Scalar value bound to a named placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::Integer(value)
    }
}

/// One entry of the user-supplied parameter list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryParameter {
    /// Placeholder name without the leading `:`.
    pub name: String,
    #[schema(value_type = Object)]
    pub value: BindValue,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>, value: impl Into<BindValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Name → value map handed to the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindParams(BTreeMap<String, BindValue>);

impl BindParams {
    /// Builds the map from an ordered list. Later duplicates overwrite earlier ones.
    pub fn from_list(parameters: &[QueryParameter]) -> Self {
        let mut binds = BTreeMap::new();
        for parameter in parameters {
            binds.insert(parameter.name.clone(), parameter.value.clone());
        }
        Self(binds)
    }

    pub fn get(&self, name: &str) -> Option<&BindValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BindValue> {
        self.0.iter()
    }
}
