//! 客户端错误类型

use std::fmt;
use thiserror::Error;

/// 发起请求的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::List => "List",
            Action::Create => "Create",
            Action::Delete => "Delete",
        };
        f.write_str(name)
    }
}

/// 客户端错误
#[derive(Error, Debug)]
pub enum ClientError {
    /// 网络或响应解析错误
    #[error("网络错误: {0}")]
    Http(#[from] reqwest::Error),

    /// 服务端返回非 2xx 状态
    #[error("{action} failed: {status} {message}")]
    Status {
        action: Action,
        status: u16,
        message: String,
    },
}

impl ClientError {
    /// 服务端返回的状态码
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(err) => err.status().map(|s| s.as_u16()),
            ClientError::Status { status, .. } => Some(*status),
        }
    }
}

/// 客户端结果类型别名
pub type ClientResult<T> = Result<T, ClientError>;
