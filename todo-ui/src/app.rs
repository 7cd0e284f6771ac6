//! 客户端应用逻辑
//!
//! 每个用户操作只发出一个请求并等待其完成，期间对应按钮处于禁用状态

use todo_core::{NewTask, Task, TaskId, ValidationError};
use tracing::{error, info};

use crate::{
    api::TaskApi,
    state::{Focus, TaskItem, UiState},
};

pub const ALERT_MISSING_FIELDS: &str = "Enter both title and task description";
pub const ALERT_LOAD_FAILED: &str = "Failed to load tasks. Ensure the backend is running.";
pub const ALERT_ADD_FAILED: &str = "Failed to add task.";
pub const ALERT_DELETE_FAILED: &str = "Failed to delete task.";

/// 待办事项客户端
#[derive(Debug)]
pub struct TodoApp<A> {
    api: A,
    state: UiState,
}

impl<A: TaskApi> TodoApp<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: UiState::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut UiState {
        &mut self.state
    }

    /// 用给定任务重建列表
    pub fn render(&mut self, tasks: Vec<Task>) {
        self.state.tasks = tasks.into_iter().map(TaskItem::from).collect();
        self.state.selected = 0;
    }

    /// 重新拉取列表，`open` 为 true 时随后打开面板
    pub async fn refresh(&mut self, open: bool) {
        match self.api.list().await {
            Ok(tasks) => {
                info!("已加载 {} 个任务", tasks.len());
                self.render(tasks);
                if open {
                    self.open_panel();
                }
            }
            Err(e) => {
                error!("加载任务失败: {}", e);
                self.state.alert(ALERT_LOAD_FAILED);
            }
        }
    }

    /// 初始加载，面板保持关闭
    pub async fn load(&mut self) {
        self.refresh(false).await;
    }

    pub async fn add(&mut self) {
        if !self.state.add_enabled {
            return;
        }

        let new_task = match NewTask::new(self.state.title.value(), self.state.description.value()) {
            Ok(new_task) => new_task,
            Err(ValidationError::Missing(_)) => {
                self.state.alert(ALERT_MISSING_FIELDS);
                return;
            }
            Err(e) => {
                self.state.alert(e.to_string());
                return;
            }
        };

        self.state.add_enabled = false;
        match self.api.create(&new_task).await {
            Ok(task) => {
                info!("创建任务成功: {}", task.id);
                self.state.title.clear();
                self.state.description.clear();
                self.state.focus = Focus::Title;
                self.refresh(true).await;
            }
            Err(e) => {
                error!("创建任务失败: {}", e);
                self.state.alert(ALERT_ADD_FAILED);
            }
        }
        self.state.add_enabled = true;
    }

    pub async fn delete(&mut self, id: TaskId) {
        match self.state.item_mut(&id) {
            Some(item) if item.delete_enabled => item.delete_enabled = false,
            _ => return,
        }

        match self.api.delete(&id).await {
            Ok(_) => {
                info!("删除任务成功: {}", id);
                self.state.remove_item(&id);
            }
            Err(e) => {
                error!("删除任务失败: {}", e);
                if let Some(item) = self.state.item_mut(&id) {
                    item.delete_enabled = true;
                }
                self.state.alert(ALERT_DELETE_FAILED);
            }
        }
    }

    /// 删除当前选中的任务
    pub async fn delete_selected(&mut self) {
        if let Some(id) = self.state.selected_item().map(|item| item.task.id) {
            self.delete(id).await;
        }
    }

    pub fn open_panel(&mut self) {
        self.state.panel.open();
    }

    pub fn close_panel(&mut self) {
        self.state.panel.close();
    }

    pub fn quit(&mut self) {
        self.state.should_quit = true;
    }
}
