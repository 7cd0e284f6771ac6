//! 任务模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::error::{Field, ValidationError, ValidationResult};

/// 标题最大长度（字符数）
pub const TITLE_MAX_LEN: usize = 120;
/// 描述最大长度（字符数）
pub const DESCRIPTION_MAX_LEN: usize = 2000;

/// 任务 ID，由存储层在创建时生成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 解析路径参数中的 id，格式错误时返回校验错误
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| ValidationError::InvalidId(raw.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TaskId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for TaskId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// 待办任务
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: TaskId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// 由已校验的输入创建新任务
    pub fn new(new_task: NewTask) -> Self {
        Self::with_created_at(new_task, Utc::now())
    }

    pub fn with_created_at(new_task: NewTask, created_at: DateTime<Utc>) -> Self {
        let NewTask { title, description } = new_task;
        Self {
            id: TaskId::new(),
            title,
            description,
            completed: false,
            created_at,
            updated_at: created_at,
        }
    }
}

/// 已校验的新建任务输入，字段均已去除首尾空白
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    title: String,
    description: String,
}

impl NewTask {
    pub fn new(title: impl AsRef<str>, description: impl AsRef<str>) -> ValidationResult<Self> {
        let title = title.as_ref().trim();
        let description = description.as_ref().trim();

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push(Field::Title);
        }
        if description.is_empty() {
            missing.push(Field::Description);
        }
        if !missing.is_empty() {
            return Err(ValidationError::Missing(missing));
        }

        check_len(Field::Title, title, TITLE_MAX_LEN)?;
        check_len(Field::Description, description, DESCRIPTION_MAX_LEN)?;

        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

fn check_len(field: Field, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
