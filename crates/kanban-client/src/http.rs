use crate::api::{BoardApi, RemoteResult};
use async_trait::async_trait;
use kanban_core::{AppConfig, RemoteError};
use kanban_domain::{Board, BoardId, BoardInput, ColumnWithTasks, Task, TaskId, TaskInput, TaskMove};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Method, body and extra headers for one call.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn with_json(method: Method, body: impl serde::Serialize) -> RemoteResult<Self> {
        let body = serde_json::to_value(body).map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(Self {
            method,
            body: Some(body),
            headers: Vec::new(),
        })
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Human-readable text for a failed response.
///
/// Prefers the `detail` field of a JSON body, then the raw body text, then
/// the bare status code.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody { detail }) = serde_json::from_str::<ErrorBody>(body) {
        match detail {
            Value::String(text) if !text.is_empty() => return text,
            Value::Null | Value::String(_) => {}
            other => return other.to_string(),
        }
    }
    let raw = body.trim();
    if raw.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        raw.to_string()
    }
}

/// [`BoardApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBoardApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RemoteResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> RemoteResult<Self> {
        Self::new(config.effective_api_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends one request and returns the raw body of a 2xx response.
    pub async fn call(&self, endpoint: &str, options: RequestOptions) -> RemoteResult<Vec<u8>> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(method = %options.method, %url, "remote call");

        let mut request = self
            .client
            .request(options.method.clone(), &url)
            .header("Content-Type", "application/json");
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(ref body) = options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(method = %options.method, %url, "remote call failed: {}", e);
            RemoteError::Transport(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), %url, "remote response");

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes);
            let message = error_message(status, &text);
            tracing::error!(status = status.as_u16(), %url, "remote error: {}", message);
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(bytes.to_vec())
    }

    pub async fn call_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> RemoteResult<T> {
        let bytes = self.call(endpoint, options).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(endpoint, "could not decode response: {}", e);
            RemoteError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn list_boards(&self) -> RemoteResult<Vec<Board>> {
        self.call_json("/boards/", RequestOptions::get()).await
    }

    async fn get_board(&self, id: BoardId) -> RemoteResult<Board> {
        self.call_json(&format!("/boards/{}", id), RequestOptions::get())
            .await
    }

    async fn create_board(&self, input: BoardInput) -> RemoteResult<Board> {
        let options = RequestOptions::with_json(Method::POST, &input)?;
        self.call_json("/boards/", options).await
    }

    async fn update_board(&self, id: BoardId, input: BoardInput) -> RemoteResult<Board> {
        let options = RequestOptions::with_json(Method::PUT, &input)?;
        self.call_json(&format!("/boards/{}", id), options).await
    }

    async fn list_columns(&self, board_id: BoardId) -> RemoteResult<Vec<ColumnWithTasks>> {
        self.call_json(&format!("/columns/board/{}", board_id), RequestOptions::get())
            .await
    }

    async fn create_task(&self, input: TaskInput) -> RemoteResult<Task> {
        let options = RequestOptions::with_json(Method::POST, &input)?;
        self.call_json("/tasks/", options).await
    }

    async fn update_task(&self, id: TaskId, input: TaskInput) -> RemoteResult<Task> {
        let options = RequestOptions::with_json(Method::PUT, &input)?;
        self.call_json(&format!("/tasks/{}", id), options).await
    }

    async fn delete_task(&self, id: TaskId) -> RemoteResult<()> {
        self.call(&format!("/tasks/{}", id), RequestOptions::delete())
            .await
            .map(|_| ())
    }

    async fn move_task(&self, id: TaskId, target: TaskMove) -> RemoteResult<Task> {
        let options = RequestOptions::with_json(Method::POST, target)?;
        self.call_json(&format!("/tasks/{}/move", id), options).await
    }
}
