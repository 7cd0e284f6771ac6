//! todo-ui - 待办事项终端客户端
//!
//! 界面状态全部保存在 [`state::UiState`] 中，由 [`app::TodoApp`] 持有并通过
//! [`api::TaskApi`] 与服务端交互

pub mod api;
pub mod app;
pub mod error;
pub mod event;
pub mod state;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{HttpTaskApi, TaskApi, DEFAULT_API_BASE};
pub use app::TodoApp;
pub use error::{ClientError, ClientResult};
pub use state::{Focus, Panel, UiState};
