//! todo-core - 待办事项的共享领域模型
//!
//! 服务端与客户端共用的任务类型、输入校验以及 HTTP 接口的数据结构

pub mod api;
pub mod error;
pub mod task;

// 重新导出核心类型
pub use api::{CreateTaskRequest, DeleteResponse, ErrorBody, RouteNotFoundBody, DELETED_MESSAGE};
pub use error::{Field, ValidationError, ValidationResult};
pub use task::{NewTask, Task, TaskId, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN};
