//! API 错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::{ErrorBody, ValidationError};
use tracing::{error, warn};

use crate::store::StoreError;

/// 500 响应统一使用的提示，不向调用方暴露内部细节
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// API 错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    /// 输入校验失败
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// 请求体无法解析
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    /// 任务不存在
    #[error("Todo not found")]
    NotFound,

    /// 存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),

    /// 其他内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 创建内部错误
    pub fn internal<T: std::fmt::Display>(msg: T) -> Self {
        Self::Internal(msg.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 获取错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(err) => err.error_code(),
            ApiError::InvalidBody(_) => "INVALID_BODY",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Store(_) => "STORE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 返回给调用方的错误信息
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("请求处理失败 [{}]: {}", self.error_code(), self);
        } else {
            warn!("请求被拒绝 [{}]: {}", self.error_code(), self);
        }

        (status, Json(ErrorBody::new(self.public_message()))).into_response()
    }
}

/// API 结果类型别名
pub type ApiResult<T> = Result<T, ApiError>;
