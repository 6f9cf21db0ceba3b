//! Oracle credential model and its declarative schema.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::schema::{PropertyDescriptor, PropertyOption, PropertyType, TypeOptions};

/// Name under which the host stores these credentials.
pub const CREDENTIAL_TYPE_NAME: &str = "oracle11gApi";

const DEFAULT_PORT: u16 = 1521;

/// How `database` identifies the target instance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionType {
    /// `host:port/service_name`.
    #[default]
    #[serde(alias = "service")]
    ServiceName,
    /// `host:port:sid`.
    Sid,
}

/// Credentials used to open a connection.
#[derive(Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OracleCredentials {
    /// Database host.
    #[validate(length(min = 1, message = "Host is required"))]
    pub host: String,

    /// Listener port.
    #[validate(range(min = 1, message = "Port is required"))]
    #[serde(default = "default_port")]
    pub port: u16,

    /// Service name or SID, depending on `connection_type`.
    #[validate(length(min = 1, message = "Service Name / SID is required"))]
    pub database: String,

    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Never serialized back out.
    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(skip_serializing)]
    pub password: String,

    #[serde(default)]
    pub connection_type: ConnectionType,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl OracleCredentials {
    /// Builds the driver connect string.
    ///
    /// No validation happens here: a malformed host or port surfaces later as
    /// a connection failure from the driver.
    pub fn connect_string(&self) -> String {
        match self.connection_type {
            ConnectionType::Sid => format!("{}:{}:{}", self.host, self.port, self.database),
            ConnectionType::ServiceName => {
                format!("{}:{}/{}", self.host, self.port, self.database)
            }
        }
    }
}

impl fmt::Debug for OracleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("connection_type", &self.connection_type)
            .finish()
    }
}

/// Credential type descriptor consumed by the host's credential store.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialType {
    pub name: String,
    pub display_name: String,
    pub documentation_url: String,
    pub properties: Vec<PropertyDescriptor>,
}

/// Returns the Oracle 11g credential descriptor.
pub fn credential_type() -> CredentialType {
    CredentialType {
        name: CREDENTIAL_TYPE_NAME.to_string(),
        display_name: "Oracle 11g Database".to_string(),
        documentation_url: "https://docs.oracle.com/cd/B28359_01/server.111/b28318/toc.htm"
            .to_string(),
        properties: vec![
            PropertyDescriptor::string("Host", "host", "localhost").required(),
            PropertyDescriptor::new("Port", "port", PropertyType::Number, Value::from(DEFAULT_PORT))
                .required(),
            PropertyDescriptor::string("Service Name / SID", "database", "")
                .placeholder("ORCL or XE")
                .required(),
            PropertyDescriptor::string("Username", "username", "").required(),
            PropertyDescriptor::string("Password", "password", "")
                .type_options(TypeOptions {
                    password: Some(true),
                    ..Default::default()
                })
                .required(),
            PropertyDescriptor::new(
                "Connection Type",
                "connectionType",
                PropertyType::Options,
                Value::from("serviceName"),
            )
            .options(vec![
                PropertyOption::new("Service Name", "serviceName"),
                PropertyOption::new("SID", "sid"),
            ]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(connection_type: ConnectionType) -> OracleCredentials {
        OracleCredentials {
            host: "db.internal".into(),
            port: 1521,
            database: "ORCL".into(),
            username: "scott".into(),
            password: "tiger".into(),
            connection_type,
        }
    }

    #[test]
    fn test_service_name_connect_string() {
        assert_eq!(
            credentials(ConnectionType::ServiceName).connect_string(),
            "db.internal:1521/ORCL"
        );
    }

    #[test]
    fn test_sid_connect_string() {
        assert_eq!(credentials(ConnectionType::Sid).connect_string(), "db.internal:1521:ORCL");
    }

    #[test]
    fn test_connection_type_defaults_and_alias() {
        let parsed: OracleCredentials = serde_json::from_value(serde_json::json!({
            "host": "h", "port": 1522, "database": "XE", "username": "u", "password": "p"
        }))
        .unwrap();
        assert_eq!(parsed.connection_type, ConnectionType::ServiceName);

        let aliased: ConnectionType = serde_json::from_str("\"service\"").unwrap();
        assert_eq!(aliased, ConnectionType::ServiceName);
        let sid: ConnectionType = serde_json::from_str("\"sid\"").unwrap();
        assert_eq!(sid, ConnectionType::Sid);
    }

    #[test]
    fn test_password_is_hidden() {
        let creds = credentials(ConnectionType::Sid);
        assert!(!format!("{:?}", creds).contains("tiger"));
        let json = serde_json::to_value(&creds).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_empty_fields_fail_validation() {
        let mut creds = credentials(ConnectionType::ServiceName);
        assert!(creds.validate().is_ok());
        creds.host.clear();
        creds.password.clear();
        let errors = creds.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("host"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_credential_type_fields() {
        let schema = credential_type();
        let names: Vec<_> = schema.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["host", "port", "database", "username", "password", "connectionType"]
        );
        let connection_type = &schema.properties[5];
        assert_eq!(connection_type.default, "serviceName");
        assert_eq!(connection_type.options.len(), 2);
    }
}
