use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        OriginalUri, Path, State,
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::any::Any;
use todo_core::{
    CreateTaskRequest, DeleteResponse, RouteNotFoundBody, Task, TaskId, ValidationError,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

/// 根路径返回的路由清单
pub const ROUTES: [&str; 4] = [
    "GET /health",
    "GET /api/todos",
    "POST /api/todos",
    "DELETE /api/todos/:id",
];

/// 健康检查
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now(),
    }))
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "ok": true,
        "message": "Todo API is running",
        "routes": ROUTES,
    }))
}

pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let todos = state.store.list().await?;
    Ok(Json(todos))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    let new_task = request.validate()?;

    let todo = state.store.create(new_task).await?;
    info!("创建Todo: {}", todo.id);

    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    // 路径段无法解码时同样按非法 id 处理
    let Path(id) =
        path.map_err(|rejection| ValidationError::InvalidId(rejection.body_text()))?;
    let id = TaskId::parse(&id)?;

    if !state.store.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    info!("删除Todo: {}", id);

    Ok(Json(DeleteResponse::deleted(id)))
}

/// 未匹配路由
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    let body = RouteNotFoundBody {
        error: "Route not found".to_string(),
        path: uri.path().to_string(),
        method: method.to_string(),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// 处理器 panic 时返回通用 500 响应
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "未知panic".to_string()
    };

    ApiError::internal(format!("请求处理发生panic: {}", detail)).into_response()
}
