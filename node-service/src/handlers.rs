//! Handler模块

use std::time::Instant;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::errors::AppError;
use common::models::credentials::{self, CredentialType};
use common::models::node::{self, NodeDescription};
use common::models::{ExecuteRequest, ExecuteResult};
use common::response::ApiResponse;
use crate::state::AppState;
use crate::SERVICE_NAME;

/// 执行一批节点输入项
#[utoipa::path(
    post,
    path = "/api/execute",
    tag = "execute",
    request_body = ExecuteRequest,
    responses(
        (status = 200, description = "批次执行完成", body = ApiResponse<ExecuteResult>),
        (status = 400, description = "凭据或参数校验失败"),
        (status = 500, description = "某个输入项执行失败，批次中止")
    )
)]
pub async fn execute(
    State(state): State<AppState>,
    Json(req): Json<ExecuteRequest>,
) -> Result<Json<ApiResponse<ExecuteResult>>, AppError> {
    req.validate()?;

    let execution_id = Uuid::new_v4();
    let start = Instant::now();
    let items = state.executor.execute(execution_id, &req).await?;

    Ok(Json(
        ApiResponse::ok_with_service(ExecuteResult { items }, state.config.service_name.clone())
            .with_execution_id(execution_id.to_string())
            .with_duration(start.elapsed().as_millis() as u64),
    ))
}

/// 节点描述（操作参数表单）
#[utoipa::path(
    get,
    path = "/api/node/description",
    tag = "schema",
    responses(
        (status = 200, description = "节点描述", body = ApiResponse<NodeDescription>)
    )
)]
pub async fn node_description() -> Json<ApiResponse<NodeDescription>> {
    Json(ApiResponse::ok(node::node_description()))
}

/// 凭据类型描述
#[utoipa::path(
    get,
    path = "/api/credentials/schema",
    tag = "schema",
    responses(
        (status = 200, description = "凭据字段", body = ApiResponse<CredentialType>)
    )
)]
pub async fn credential_schema() -> Json<ApiResponse<CredentialType>> {
    Json(ApiResponse::ok(credentials::credential_type()))
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行正常", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use common::config::AppConfig;

    use crate::driver::StatementOutcome;
    use crate::service::tests::{credentials, FakeDriver, Step};
    use crate::state::AppState;

    fn app(steps: Vec<Step>) -> axum::Router {
        let driver = Arc::new(FakeDriver::new(steps));
        crate::create_router(AppState::with_driver(AppConfig::default(), driver))
    }

    async fn call(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_execute(body: Value) -> Request<Body> {
        Request::post("/api/execute")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn credentials_json() -> Value {
        let mut value = serde_json::to_value(credentials()).unwrap();
        value["password"] = json!("tiger");
        value
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/api/health").body(Body::empty()).unwrap();
        let (status, body) = call(app(vec![]), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_execute_returns_paired_items() {
        let body = json!({
            "credentials": credentials_json(),
            "items": [{ "operation": "insert", "table": "T", "columns": "A", "values": ":a",
                        "parameters": [{ "name": "a", "value": 1 }] }]
        });
        let (status, body) = call(
            app(vec![Step::Returns(StatementOutcome::affected(1))]),
            post_execute(body),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["items"][0],
            json!({
                "json": { "operation": "insert", "rowsAffected": 1, "success": true },
                "pairedItem": { "item": 0 }
            })
        );
        assert!(body["meta"]["executionId"].is_string());
    }

    #[tokio::test]
    async fn test_execute_abort_reports_item_index() {
        let body = json!({
            "credentials": credentials_json(),
            "items": [{}, {}]
        });
        let (status, body) = call(
            app(vec![
                Step::Returns(StatementOutcome::rows(vec![])),
                Step::ExecuteFails("ORA-00904: invalid identifier"),
            ]),
            post_execute(body),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "NODE_OPERATION_ERROR");
        assert_eq!(body["error"]["message"], "ORA-00904: invalid identifier");
        assert_eq!(body["error"]["details"]["itemIndex"], 1);
    }

    #[tokio::test]
    async fn test_execute_rejects_incomplete_credentials() {
        let mut credentials = credentials_json();
        credentials["host"] = json!("");
        let body = json!({ "credentials": credentials, "items": [{}] });

        let (status, body) = call(app(vec![]), post_execute(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_schemas_are_served() {
        let request = Request::get("/api/credentials/schema").body(Body::empty()).unwrap();
        let (_, body) = call(app(vec![]), request).await;
        assert_eq!(body["data"]["name"], "oracle11gApi");

        let request = Request::get("/api/node/description").body(Body::empty()).unwrap();
        let (_, body) = call(app(vec![]), request).await;
        assert_eq!(body["data"]["name"], "oracle11g");
    }
}
