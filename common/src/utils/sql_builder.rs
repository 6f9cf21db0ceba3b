//! SQL statement builder.
//!
//! Turns an [`Operation`] into the statement text sent to the driver.
//!
//! # Caller responsibility
//! Table names, column lists, value lists, SET and WHERE clauses are
//! concatenated verbatim. Only values can be bound as driver parameters, so
//! these fields must never carry untrusted input. Use `:name` placeholders
//! for values and pass them through the parameter list instead.

use crate::models::operation::Operation;

/// Builds SQL text for the node's operations.
pub struct SqlBuilder;

impl SqlBuilder {
    /// Builds the statement for an operation.
    ///
    /// # Arguments
    /// * `operation` - The resolved operation of one item
    ///
    /// # Returns
    /// The SQL text. A raw query is returned unmodified.
    pub fn build(operation: &Operation) -> String {
        match operation {
            Operation::ExecuteQuery { query } => query.clone(),
            Operation::Insert {
                table,
                columns,
                values,
            } => Self::insert(table, columns, values),
            Operation::Update {
                table,
                set_clause,
                where_clause,
            } => Self::update(table, set_clause, where_clause),
        }
    }

    /// `INSERT INTO <table> (<columns>) VALUES (<values>)`.
    pub fn insert(table: &str, columns: &str, values: &str) -> String {
        format!("INSERT INTO {} ({}) VALUES ({})", table, columns, values)
    }

    /// `UPDATE <table> SET <set_clause>`, plus `WHERE <where_clause>` when given.
    ///
    /// An empty `where_clause` yields a statement that updates every row.
    pub fn update(table: &str, set_clause: &str, where_clause: &str) -> String {
        let mut sql = format!("UPDATE {} SET {}", table, set_clause);
        if where_clause.is_empty() {
            tracing::warn!(table = %table, "UPDATE without WHERE clause affects every row");
        } else {
            sql.push_str(" WHERE ");
            sql.push_str(where_clause);
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_query_is_unmodified() {
        let query = "  select * from emp where deptno = :dept  ";
        let op = Operation::ExecuteQuery {
            query: query.into(),
        };
        assert_eq!(SqlBuilder::build(&op), query);
    }

    #[test]
    fn test_insert() {
        let op = Operation::Insert {
            table: "T".into(),
            columns: "a,b".into(),
            values: ":v1,:v2".into(),
        };
        assert_eq!(SqlBuilder::build(&op), "INSERT INTO T (a,b) VALUES (:v1,:v2)");
    }

    #[test]
    fn test_update_without_where() {
        assert_eq!(SqlBuilder::update("T", "x=:v", ""), "UPDATE T SET x=:v");
    }

    #[test]
    fn test_update_with_where() {
        let op = Operation::Update {
            table: "T".into(),
            set_clause: "x=:v".into(),
            where_clause: "id=:id".into(),
        };
        assert_eq!(SqlBuilder::build(&op), "UPDATE T SET x=:v WHERE id=:id");
    }
}
