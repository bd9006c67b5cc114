use async_trait::async_trait;
use kanban_core::RemoteError;
use kanban_domain::{Board, BoardId, BoardInput, ColumnWithTasks, Task, TaskId, TaskInput, TaskMove};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Endpoints of the board service the client depends on.
///
/// Every method is one independent attempt; nothing here retries.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// `GET /boards/`
    async fn list_boards(&self) -> RemoteResult<Vec<Board>>;

    /// `GET /boards/{id}`
    async fn get_board(&self, id: BoardId) -> RemoteResult<Board>;

    /// `POST /boards/`; the service provisions default columns
    async fn create_board(&self, input: BoardInput) -> RemoteResult<Board>;

    /// `PUT /boards/{id}`
    async fn update_board(&self, id: BoardId, input: BoardInput) -> RemoteResult<Board>;

    /// `GET /columns/board/{board_id}`, tasks nested per column
    async fn list_columns(&self, board_id: BoardId) -> RemoteResult<Vec<ColumnWithTasks>>;

    /// `POST /tasks/`
    async fn create_task(&self, input: TaskInput) -> RemoteResult<Task>;

    /// `PUT /tasks/{id}`
    async fn update_task(&self, id: TaskId, input: TaskInput) -> RemoteResult<Task>;

    /// `DELETE /tasks/{id}`
    async fn delete_task(&self, id: TaskId) -> RemoteResult<()>;

    /// `POST /tasks/{id}/move`
    async fn move_task(&self, id: TaskId, target: TaskMove) -> RemoteResult<Task>;
}
