//! Oracle 11g 工作流节点执行服务
//!
//! 提供节点执行功能，包括：
//! - 按输入项逐条执行查询 / 插入 / 更新
//! - 行结果映射为带配对索引的输出项
//! - 凭据与节点参数描述

mod client_init;
mod driver;
mod handlers;
mod routes;
mod service;
mod state;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use common::config::AppConfig;
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "node-service";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Oracle 11g 节点 API",
        version = "0.1.0",
        description = "Oracle 11g 工作流节点执行服务"
    ),
    paths(
        handlers::execute,
        handlers::node_description,
        handlers::credential_schema,
        handlers::health_check,
    ),
    components(schemas(
        common::models::ExecuteRequest,
        common::models::ExecuteResult,
        common::models::ItemParameters,
        common::models::NodeExecutionData,
        common::models::OperationKind,
        common::models::OracleCredentials,
        common::models::ConnectionType,
        common::models::QueryParameter,
        handlers::HealthResponse,
    )),
    tags(
        (name = "execute", description = "节点执行端点"),
        (name = "schema", description = "凭据与参数描述端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (if present) before anything else
    load_dotenv();

    // 初始化日志追踪
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME);
    info!(
        client_lib_dir = ?config.oracle_client_lib_dir,
        fetch_array_size = config.fetch_array_size,
        "配置已加载"
    );

    // 创建应用状态
    let state = AppState::new(config.clone());

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = format!("{}:{}", config.host, config.port);
    info!(service = SERVICE_NAME, address = %addr, "启动服务");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {}", addr))?;
    axum::serve(listener, app).await.context("服务启动失败")?;
    Ok(())
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Load .env file from the working directory (best-effort, no error if missing).
fn load_dotenv() {
    let Ok(content) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            // Only set if not already set by the environment
            if std::env::var(key).is_err() {
                std::env::set_var(key, value.trim());
            }
        }
    }
}
