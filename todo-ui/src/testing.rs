//! 测试用的内存任务接口

use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};
use todo_core::{DeleteResponse, NewTask, Task, TaskId};

use crate::{
    api::TaskApi,
    error::{Action, ClientError, ClientResult},
};

#[derive(Debug, Default)]
pub struct MockApi {
    tasks: Mutex<Vec<Task>>,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
    create_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MockApi {
    /// 按给定顺序创建任务，最后一个最新
    pub fn with_tasks(titles: &[&str]) -> Self {
        let api = Self::default();
        for title in titles {
            let new_task = NewTask::new(title, "description").unwrap();
            api.tasks.lock().unwrap().push(Task::new(new_task));
        }
        api
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }
}

fn server_error(action: Action) -> ClientError {
    ClientError::Status {
        action,
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

#[async_trait]
impl TaskApi for MockApi {
    async fn list(&self) -> ClientResult<Vec<Task>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(server_error(Action::List));
        }
        Ok(self.tasks.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn create(&self, new_task: &NewTask) -> ClientResult<Task> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(server_error(Action::Create));
        }
        let task = Task::new(new_task.clone());
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> ClientResult<DeleteResponse> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(server_error(Action::Delete));
        }
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|task| task.id != *id);
        if tasks.len() == before {
            return Err(ClientError::Status {
                action: Action::Delete,
                status: 404,
                message: "Todo not found".to_string(),
            });
        }
        Ok(DeleteResponse::deleted(*id))
    }
}
