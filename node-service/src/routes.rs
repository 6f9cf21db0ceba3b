//! 路由模块

use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/execute", post(handlers::execute))
        .route("/api/node/description", get(handlers::node_description))
        .route("/api/credentials/schema", get(handlers::credential_schema))
        .route("/api/health", get(handlers::health_check))
}
