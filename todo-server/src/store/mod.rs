//! 任务存储层
//!
//! 通过 [`TaskStore`] 特征屏蔽具体存储实现，当前提供内存与 SQLite 两种后端

mod memory;
mod sqlite;

pub use memory::MemoryTaskStore;
pub use sqlite::SqliteTaskStore;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use todo_core::{NewTask, Task, TaskId};
use tracing::info;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite 错误
    #[error("SQLite错误: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// 后台任务执行失败
    #[error("后台任务错误: {0}")]
    Task(String),

    /// 不支持的数据库连接串
    #[error("不支持的数据库连接串: {0}")]
    UnsupportedUrl(String),

    /// 存储中的数据无法解析
    #[error("数据损坏: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// 创建数据损坏错误
    pub fn corrupt<T: std::fmt::Display>(msg: T) -> Self {
        Self::Corrupt(msg.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

/// 存储结果类型别名
pub type StoreResult<T> = Result<T, StoreError>;

/// 任务存储特征
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// 按创建时间倒序列出全部任务
    async fn list(&self) -> StoreResult<Vec<Task>>;

    /// 持久化新任务并返回存储后的记录
    async fn create(&self, new_task: NewTask) -> StoreResult<Task>;

    /// 删除任务，返回是否确有记录被删除
    async fn delete(&self, id: &TaskId) -> StoreResult<bool>;
}

/// 根据连接串打开存储
///
/// 支持 `memory://`、`sqlite::memory:`、`sqlite://<path>` 与 `sqlite:<path>`
pub fn open_store(database_url: &str) -> StoreResult<Arc<dyn TaskStore>> {
    let url = database_url.trim();

    if url == "memory" || url == "memory://" {
        info!("使用内存存储");
        return Ok(Arc::new(MemoryTaskStore::new()));
    }

    if url == "sqlite::memory:" {
        info!("使用SQLite内存数据库");
        return Ok(Arc::new(SqliteTaskStore::open_in_memory()?));
    }

    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .filter(|path| !path.is_empty())
        .ok_or_else(|| StoreError::UnsupportedUrl(url.to_string()))?;

    info!("使用SQLite数据库: {}", path);
    Ok(Arc::new(SqliteTaskStore::open(path)?))
}
