//! SQLite 任务存储

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{params, Connection, Row};
use std::{
    path::Path,
    sync::{Arc, Mutex},
};
use todo_core::{NewTask, Task, TaskId};

use super::{StoreError, StoreResult, TaskStore};

const SCHEMA_TODOS: &str = "CREATE TABLE IF NOT EXISTS todos (
    id TEXT NOT NULL PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);";
const INSERT_TODO: &str = "INSERT INTO todos (id, title, description, completed, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_TODOS: &str = "SELECT id, title, description, completed, created_at, updated_at
    FROM todos ORDER BY created_at DESC, rowid DESC";
const DELETE_TODO: &str = "DELETE FROM todos WHERE id = ?1";

/// SQLite 任务存储
///
/// rusqlite 为同步接口，所有调用都放到阻塞线程池执行
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTaskStore {
    /// 打开（或创建）数据库文件
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    /// 打开内存数据库
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute(SCHEMA_TODOS, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Task("SQLite连接锁已中毒".to_string()))?;
            f(&guard)
        })
        .await?
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(SELECT_TODOS)?;
            let rows = stmt.query_map([], read_row)?;

            let mut tasks = Vec::new();
            for row in rows {
                tasks.push(decode_row(row?)?);
            }
            Ok(tasks)
        })
        .await
    }

    async fn create(&self, new_task: NewTask) -> StoreResult<Task> {
        // 列存储精度为微秒，返回值与读回的记录保持一致
        let task = Task::with_created_at(new_task, Utc::now().trunc_subsecs(6));
        let record = task.clone();

        self.with_conn(move |conn| {
            conn.execute(
                INSERT_TODO,
                params![
                    record.id.to_string(),
                    record.title,
                    record.description,
                    record.completed,
                    record.created_at.timestamp_micros(),
                    record.updated_at.timestamp_micros(),
                ],
            )?;
            Ok(())
        })
        .await?;

        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> StoreResult<bool> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let removed = conn.execute(DELETE_TODO, params![id])?;
            Ok(removed > 0)
        })
        .await
    }
}

/// 数据库中的原始行
struct TodoRow {
    id: String,
    title: String,
    description: String,
    completed: bool,
    created_at: i64,
    updated_at: i64,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<TodoRow> {
    Ok(TodoRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn decode_row(row: TodoRow) -> StoreResult<Task> {
    let id = TaskId::parse(&row.id)
        .map_err(|_| StoreError::corrupt(format!("无效的任务id: {}", row.id)))?;

    Ok(Task {
        id,
        title: row.title,
        description: row.description,
        completed: row.completed,
        created_at: decode_timestamp(row.created_at)?,
        updated_at: decode_timestamp(row.updated_at)?,
    })
}

fn decode_timestamp(micros: i64) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| StoreError::corrupt(format!("无效的时间戳: {}", micros)))
}
