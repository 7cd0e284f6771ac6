//! 内存任务存储

use async_trait::async_trait;
use tokio::sync::RwLock;
use todo_core::{NewTask, Task, TaskId};

use super::{StoreResult, TaskStore};

/// 内存任务存储，数据仅在进程生命周期内有效
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    todos: RwLock<Vec<Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self) -> StoreResult<Vec<Task>> {
        let todos = self.todos.read().await;
        // 先按插入顺序倒置，稳定排序保证同一时间戳下后插入的在前
        let mut tasks: Vec<Task> = todos.iter().rev().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn create(&self, new_task: NewTask) -> StoreResult<Task> {
        let task = Task::new(new_task);
        self.todos.write().await.push(task.clone());
        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> StoreResult<bool> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| todo.id != *id);
        Ok(todos.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn new_task(title: &str) -> NewTask {
        NewTask::new(title, "description").unwrap()
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryTaskStore::new();
        store.create(new_task("first")).await.unwrap();
        store.create(new_task("second")).await.unwrap();
        store.create(new_task("third")).await.unwrap();

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|task| task.title)
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_list_orders_by_created_at() {
        let store = MemoryTaskStore::new();
        let now = Utc::now();
        let older = Task::with_created_at(new_task("older"), now - Duration::hours(1));
        let newer = Task::with_created_at(new_task("newer"), now);
        // 插入顺序与时间顺序相反
        store.todos.write().await.push(newer.clone());
        store.todos.write().await.push(older.clone());

        assert_eq!(store.list().await.unwrap(), vec![newer, older]);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryTaskStore::new();
        let task = store.create(new_task("remove me")).await.unwrap();

        assert!(store.delete(&task.id).await.unwrap());
        assert!(!store.delete(&task.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
