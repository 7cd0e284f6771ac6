//! todo-server - 待办事项 REST API
//!
//! 基于 axum 的 HTTP 服务，任务持久化委托给 [`store::TaskStore`]

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use axum::{
    routing::{delete, get},
    Router,
};
use routes::{create_todo, delete_todo, handle_panic, health_check, list_todos, root, route_not_found};
use std::sync::Arc;
use store::{MemoryTaskStore, TaskStore};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use store::{open_store, StoreError, StoreResult};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// 使用内存存储创建状态
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTaskStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }
}

pub fn create_app(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", delete(delete_todo))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .with_state(state);
    apply_layers(router)
}

/// 挂载中间件：panic 捕获、请求追踪、CORS
pub fn apply_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// 按配置打开存储并创建应用
pub fn create_app_from_config(config: &ServerConfig) -> StoreResult<Router> {
    let store = open_store(&config.database_url)?;
    info!("Todo应用创建成功");
    Ok(create_app(AppState::new(store)))
}
