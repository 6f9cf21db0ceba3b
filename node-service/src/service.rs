//! 节点执行服务模块
//!
//! Runs one batch: items are processed strictly in order, each with its own
//! connection, and every opened connection is closed before the next item.

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use common::errors::AppResult;
use common::models::{
    BindParams, ExecuteRequest, ItemParameters, NodeExecutionData, OperationKind,
    OracleCredentials,
};
use common::utils::SqlBuilder;

use crate::driver::{ExecuteOptions, OracleDriver, StatementOutcome};

/// Executes batches of node items against Oracle.
pub struct ExecutionService {
    driver: Arc<dyn OracleDriver>,
    options: ExecuteOptions,
}

impl ExecutionService {
    /// Creates a new execution service.
    pub fn new(driver: Arc<dyn OracleDriver>, options: ExecuteOptions) -> Self {
        Self { driver, options }
    }

    /// Runs every item of the request.
    ///
    /// With `continue_on_fail` a failed item becomes an `{error}` record and
    /// the loop moves on; otherwise the first failure aborts the batch and is
    /// returned as [`common::errors::AppError::ItemFailed`] carrying the item index.
    pub async fn execute(
        &self,
        execution_id: Uuid,
        req: &ExecuteRequest,
    ) -> AppResult<Vec<NodeExecutionData>> {
        let span = tracing::info_span!(
            "execute",
            execution_id = %execution_id,
            items = req.items.len(),
        );

        async {
            let mut output = Vec::new();

            for (index, item) in req.items.iter().enumerate() {
                match self.run_item(&req.credentials, item, index).await {
                    Ok(records) => {
                        tracing::info!(item = index, records = records.len(), "Item executed");
                        output.extend(records);
                    }
                    Err(e) if req.continue_on_fail => {
                        tracing::warn!(item = index, error = %e, "Item failed, continuing");
                        output.push(NodeExecutionData::error(e.to_string(), index));
                    }
                    Err(e) => {
                        tracing::error!(item = index, error = %e, "Item failed, aborting batch");
                        return Err(e.for_item(index));
                    }
                }
            }

            Ok(output)
        }
        .instrument(span)
        .await
    }

    async fn run_item(
        &self,
        credentials: &OracleCredentials,
        item: &ItemParameters,
        index: usize,
    ) -> AppResult<Vec<NodeExecutionData>> {
        let operation = item.resolve();
        let mut session = self.driver.connect(credentials).await?;

        let binds = BindParams::from_list(&item.parameters);
        let sql = SqlBuilder::build(&operation);
        tracing::debug!(item = index, operation = %operation.kind(), binds = binds.len(), "Executing statement");

        let result = session.execute(&sql, &binds, self.options).await;
        let closed = session.close().await;

        let outcome = match (result, closed) {
            (Ok(outcome), Ok(())) => outcome,
            (Ok(_), Err(close_err)) => return Err(close_err),
            (Err(e), Ok(())) => return Err(e),
            (Err(e), Err(close_err)) => {
                tracing::warn!(item = index, error = %close_err, "Failed to close connection after error");
                return Err(e);
            }
        };

        Ok(Self::to_records(operation.kind(), outcome, index))
    }

    fn to_records(
        kind: OperationKind,
        outcome: StatementOutcome,
        index: usize,
    ) -> Vec<NodeExecutionData> {
        match (kind, outcome.rows) {
            (OperationKind::ExecuteQuery, Some(rows)) => rows
                .into_iter()
                .map(|row| NodeExecutionData::row(row, index))
                .collect(),
            _ => vec![NodeExecutionData::summary(
                kind,
                outcome.rows_affected.unwrap_or(0),
                index,
            )],
        }
    }
}
