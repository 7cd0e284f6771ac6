//! HTTP 接口的请求与响应结构

use serde::{Deserialize, Serialize};

use crate::{error::ValidationResult, task::NewTask, task::TaskId};

/// 删除成功时的提示信息
pub const DELETED_MESSAGE: &str = "Todo deleted";

/// 创建任务请求体
///
/// 字段在反序列化层均为可选，缺失字段交由 [`CreateTaskRequest::validate`] 报告
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTaskRequest {
    pub fn validate(self) -> ValidationResult<NewTask> {
        NewTask::new(
            self.title.unwrap_or_default(),
            self.description.unwrap_or_default(),
        )
    }
}

/// 删除任务响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub id: TaskId,
}

impl DeleteResponse {
    pub fn deleted(id: TaskId) -> Self {
        Self {
            message: DELETED_MESSAGE.to_string(),
            id,
        }
    }
}

/// 错误响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new<T: Into<String>>(error: T) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 未匹配路由的响应体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNotFoundBody {
    pub error: String,
    pub path: String,
    pub method: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, ValidationError};

    #[test]
    fn test_create_request_missing_field() {
        let request: CreateTaskRequest = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(
            request.validate().unwrap_err(),
            ValidationError::Missing(vec![Field::Description])
        );
    }

    #[test]
    fn test_create_request_valid() {
        let request: CreateTaskRequest =
            serde_json::from_str(r#"{"title":" Buy milk ","description":"2%"}"#).unwrap();
        let new_task = request.validate().unwrap();
        assert_eq!(new_task.title(), "Buy milk");
    }

    #[test]
    fn test_delete_response() {
        let id = TaskId::new();
        let response = DeleteResponse::deleted(id);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["message"], "Todo deleted");
        assert_eq!(value["id"], id.to_string());
    }
}
