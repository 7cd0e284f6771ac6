//! 任务接口客户端

use async_trait::async_trait;
use reqwest::{Client, Response};
use todo_core::{DeleteResponse, ErrorBody, NewTask, Task, TaskId};
use tracing::debug;

use crate::error::{Action, ClientError, ClientResult};

/// 默认任务接口地址
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api/todos";

/// 任务接口特征
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// 获取任务列表
    async fn list(&self) -> ClientResult<Vec<Task>>;

    /// 创建任务
    async fn create(&self, new_task: &NewTask) -> ClientResult<Task>;

    /// 删除任务
    async fn delete(&self, id: &TaskId) -> ClientResult<DeleteResponse>;
}

/// 基于 HTTP 的任务接口实现
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client<S: Into<String>>(client: Client, base_url: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpTaskApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> ClientResult<Vec<Task>> {
        debug!("GET {}", self.base_url);
        let response = self.client.get(&self.base_url).send().await?;
        let response = ensure_success(Action::List, response).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, new_task: &NewTask) -> ClientResult<Task> {
        debug!("POST {}", self.base_url);
        let response = self
            .client
            .post(&self.base_url)
            .json(new_task)
            .send()
            .await?;
        let response = ensure_success(Action::Create, response).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &TaskId) -> ClientResult<DeleteResponse> {
        let url = format!("{}/{}", self.base_url, id);
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        let response = ensure_success(Action::Delete, response).await?;
        Ok(response.json().await?)
    }
}

/// 非 2xx 响应转换为 [`ClientError::Status`]，优先使用服务端返回的 `error` 字段
async fn ensure_success(action: Action, response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ClientError::Status {
        action,
        status: status.as_u16(),
        message,
    })
}
