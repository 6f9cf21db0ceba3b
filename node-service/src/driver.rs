//! Oracle 驱动抽象
//!
//! The executor talks to the database only through [`OracleDriver`] and
//! [`OracleSession`]. [`OciDriver`] is the production implementation on top of
//! the blocking `oracle` crate; every call runs on the blocking thread pool.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Utc};
use oracle::sql_type::OracleType;
use oracle::{Connection, Row, Statement};
use serde_json::Value;

use common::config::DEFAULT_FETCH_ARRAY_SIZE;
use common::errors::{AppError, AppResult};
use common::models::{BindParams, BindValue, OracleCredentials, RowObject};

use crate::client_init::{init_thick_client, THICK_CLIENT};

/// Options applied to every statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Rows fetched per round trip.
    pub fetch_array_size: u32,
    /// Commit every non-query statement immediately.
    pub auto_commit: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            fetch_array_size: DEFAULT_FETCH_ARRAY_SIZE,
            auto_commit: true,
        }
    }
}

/// What a statement produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementOutcome {
    /// Fetched rows, present only when the statement returned a row set.
    pub rows: Option<Vec<RowObject>>,
    /// Rows affected, when the driver reports it.
    pub rows_affected: Option<u64>,
}

impl StatementOutcome {
    pub fn rows(rows: Vec<RowObject>) -> Self {
        Self {
            rows: Some(rows),
            rows_affected: None,
        }
    }

    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows: None,
            rows_affected: Some(rows_affected),
        }
    }
}

/// Opens connections.
#[async_trait]
pub trait OracleDriver: Send + Sync {
    /// Opens one connection for the given credentials.
    async fn connect(&self, credentials: &OracleCredentials) -> AppResult<Box<dyn OracleSession>>;
}

/// A single open connection.
#[async_trait]
pub trait OracleSession: Send {
    /// Executes one statement with named binds.
    async fn execute(
        &mut self,
        sql: &str,
        binds: &BindParams,
        options: ExecuteOptions,
    ) -> AppResult<StatementOutcome>;

    /// Releases the connection.
    async fn close(self: Box<Self>) -> AppResult<()>;
}

/// Driver backed by Oracle Instant Client.
pub struct OciDriver {
    client_lib_dir: Option<String>,
}

impl OciDriver {
    /// `client_lib_dir` is used for the one-time thick-mode init attempt.
    pub fn new(client_lib_dir: Option<String>) -> Self {
        Self { client_lib_dir }
    }
}

#[async_trait]
impl OracleDriver for OciDriver {
    async fn connect(&self, credentials: &OracleCredentials) -> AppResult<Box<dyn OracleSession>> {
        let lib_dir = self.client_lib_dir.clone();
        let username = credentials.username.clone();
        let password = credentials.password.clone();
        let connect_string = credentials.connect_string();

        tracing::debug!(connect_string = %connect_string, username = %username, "Opening Oracle connection");

        let conn = blocking(move || {
            if let Some(dir) = lib_dir.as_deref() {
                THICK_CLIENT.ensure(|| init_thick_client(dir));
            }
            Connection::connect(&username, &password, &connect_string)
        })
        .await?;

        Ok(Box::new(OciSession {
            conn: Arc::new(conn),
        }))
    }
}

struct OciSession {
    conn: Arc<Connection>,
}

#[async_trait]
impl OracleSession for OciSession {
    async fn execute(
        &mut self,
        sql: &str,
        binds: &BindParams,
        options: ExecuteOptions,
    ) -> AppResult<StatementOutcome> {
        let conn = Arc::clone(&self.conn);
        let sql = sql.to_string();
        let binds = binds.clone();
        blocking(move || run_statement(&conn, &sql, &binds, options)).await
    }

    async fn close(self: Box<Self>) -> AppResult<()> {
        let conn = self.conn;
        blocking(move || conn.close()).await
    }
}

/// Runs a blocking driver call off the async runtime.
async fn blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> oracle::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("driver task failed: {}", e)))?
        .map_err(|e| AppError::Database(e.to_string()))
}

fn run_statement(
    conn: &Connection,
    sql: &str,
    binds: &BindParams,
    options: ExecuteOptions,
) -> oracle::Result<StatementOutcome> {
    let mut stmt = conn
        .statement(sql)
        .fetch_array_size(options.fetch_array_size)
        .build()?;
    for (name, value) in binds.iter() {
        bind_value(&mut stmt, name, value)?;
    }

    if stmt.is_query() {
        let result_set = stmt.query(&[])?;
        let columns: Vec<(String, OracleType)> = result_set
            .column_info()
            .iter()
            .map(|col| (col.name().to_string(), col.oracle_type().clone()))
            .collect();

        let mut rows = Vec::new();
        for row in result_set {
            rows.push(row_object(&row?, &columns)?);
        }
        return Ok(StatementOutcome::rows(rows));
    }

    stmt.execute(&[])?;
    let rows_affected = stmt.row_count()?;
    if options.auto_commit {
        conn.commit()?;
    }
    Ok(StatementOutcome::affected(rows_affected))
}

fn bind_value(stmt: &mut Statement, name: &str, value: &BindValue) -> oracle::Result<()> {
    match value {
        BindValue::Null => stmt.bind(name, &None::<String>),
        // 11g has no SQL BOOLEAN
        BindValue::Bool(v) => stmt.bind(name, &i64::from(*v)),
        BindValue::Integer(v) => stmt.bind(name, v),
        BindValue::Float(v) => stmt.bind(name, v),
        BindValue::Text(v) => stmt.bind(name, v),
    }
}

fn row_object(row: &Row, columns: &[(String, OracleType)]) -> oracle::Result<RowObject> {
    let mut object = RowObject::new();
    for (index, (name, oracle_type)) in columns.iter().enumerate() {
        object.insert(name.clone(), column_value(row, index, oracle_type)?);
    }
    Ok(object)
}

fn column_value(row: &Row, index: usize, oracle_type: &OracleType) -> oracle::Result<Value> {
    let value = match oracle_type {
        OracleType::Number(_, _)
        | OracleType::Float(_)
        | OracleType::BinaryFloat
        | OracleType::BinaryDouble => row
            .get::<_, Option<String>>(index)?
            .map(|text| numeric_value(&text)),
        OracleType::Date | OracleType::Timestamp(_) => row
            .get::<_, Option<NaiveDateTime>>(index)?
            .map(|ts| Value::String(timestamp_text(ts.and_utc()))),
        OracleType::TimestampTZ(_) | OracleType::TimestampLTZ(_) => row
            .get::<_, Option<DateTime<FixedOffset>>>(index)?
            .map(|ts| Value::String(timestamp_text(ts.with_timezone(&Utc)))),
        _ => row.get::<_, Option<String>>(index)?.map(Value::String),
    };
    Ok(value.unwrap_or(Value::Null))
}

/// ISO-8601 in UTC with millisecond precision and a `Z` suffix.
/// Zone-less DATE/TIMESTAMP values are read as UTC.
fn timestamp_text(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Converts Oracle's textual number into a JSON number where it fits.
/// Integers outside `i64` stay text so no digits are lost.
fn numeric_value(text: &str) -> Value {
    if let Ok(int) = text.parse::<i64>() {
        return Value::from(int);
    }
    if !text.contains(['.', 'e', 'E']) {
        return Value::String(text.to_string());
    }
    text.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_numeric_value_integers() {
        assert_eq!(numeric_value("42"), Value::from(42));
        assert_eq!(numeric_value("-7"), Value::from(-7));
    }

    #[test]
    fn test_numeric_value_decimals() {
        assert_eq!(numeric_value("3.25"), Value::from(3.25));
        assert_eq!(numeric_value(".5"), Value::from(0.5));
    }

    #[test]
    fn test_numeric_value_out_of_range_keeps_text() {
        let huge = "123456789012345678901234567890123456789";
        assert_eq!(numeric_value(huge), Value::String(huge.into()));
        assert_eq!(numeric_value("-9223372036854775809"), Value::String("-9223372036854775809".into()));
        assert_eq!(numeric_value("~"), Value::String("~".into()));
    }

    #[test]
    fn test_numeric_value_large_decimal_is_float() {
        assert!(numeric_value("12345678901234567890.5").is_f64());
    }

    #[test]
    fn test_timestamp_text_is_utc_with_millis() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(14, 5, 7, 250)
            .unwrap();
        assert_eq!(timestamp_text(naive.and_utc()), "2024-03-09T14:05:07.250Z");

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let zoned = naive.and_local_timezone(offset).unwrap();
        assert_eq!(
            timestamp_text(zoned.with_timezone(&Utc)),
            "2024-03-09T12:05:07.250Z"
        );
    }

    #[test]
    fn test_default_options() {
        let options = ExecuteOptions::default();
        assert_eq!(options.fetch_array_size, 100);
        assert!(options.auto_commit);
    }
}
