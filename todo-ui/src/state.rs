//! 界面状态

use todo_core::{Task, TaskId};

/// 任务列表为空时显示的占位文字
pub const EMPTY_PLACEHOLDER: &str = "No tasks yet. Add one!";

/// 文本输入框
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
}

impl InputField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn set<S: Into<String>>(&mut self, value: S) {
        self.value = value.into();
    }

    pub fn insert(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// 当前获得焦点的输入框
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Title,
    Description,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Title => Focus::Description,
            Focus::Description => Focus::Title,
        }
    }
}

/// 任务面板，只有打开与关闭两种状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Closed,
    Open,
}

impl Panel {
    pub fn open(&mut self) {
        *self = Panel::Open;
    }

    pub fn close(&mut self) {
        *self = Panel::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Panel::Open)
    }
}

/// 列表中的一项任务及其删除按钮状态
#[derive(Debug, Clone, PartialEq)]
pub struct TaskItem {
    pub task: Task,
    pub delete_enabled: bool,
}

impl From<Task> for TaskItem {
    fn from(task: Task) -> Self {
        Self {
            task,
            delete_enabled: true,
        }
    }
}

/// 客户端界面状态
#[derive(Debug, Clone)]
pub struct UiState {
    pub title: InputField,
    pub description: InputField,
    pub focus: Focus,
    /// 提交按钮是否可用
    pub add_enabled: bool,
    pub tasks: Vec<TaskItem>,
    pub selected: usize,
    pub panel: Panel,
    /// 阻塞式提示，存在时只响应关闭操作
    pub alert: Option<String>,
    pub should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            title: InputField::default(),
            description: InputField::default(),
            focus: Focus::default(),
            add_enabled: true,
            tasks: Vec::new(),
            selected: 0,
            panel: Panel::default(),
            alert: None,
            should_quit: false,
        }
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_input_mut(&mut self) -> &mut InputField {
        match self.focus {
            Focus::Title => &mut self.title,
            Focus::Description => &mut self.description,
        }
    }

    /// 列表为空时返回占位文字
    pub fn placeholder(&self) -> Option<&'static str> {
        self.tasks.is_empty().then_some(EMPTY_PLACEHOLDER)
    }

    pub fn selected_item(&self) -> Option<&TaskItem> {
        self.tasks.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn item_mut(&mut self, id: &TaskId) -> Option<&mut TaskItem> {
        self.tasks.iter_mut().find(|item| item.task.id == *id)
    }

    /// 移除任务项，返回是否找到
    pub fn remove_item(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|item| item.task.id != *id);
        if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len().saturating_sub(1);
        }
        self.tasks.len() != before
    }

    pub fn alert<S: Into<String>>(&mut self, message: S) {
        self.alert = Some(message.into());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
