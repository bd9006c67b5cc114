#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use kanban_client::api::RemoteResult;
use kanban_client::BoardApi;
use kanban_core::RemoteError;
use kanban_domain::{
    Board, BoardId, BoardInput, Column, ColumnId, ColumnWithTasks, Task, TaskId, TaskInput,
    TaskMove,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Default)]
struct Data {
    boards: Vec<Board>,
    columns: Vec<Column>,
    tasks: Vec<Task>,
    next_id: i64,
}

impl Data {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory board service with the same position bookkeeping as the real
/// one: appends on create, closes gaps on delete, shifts on move.
#[derive(Default)]
pub struct FakeBoardService {
    data: Mutex<Data>,
    events: Mutex<Vec<String>>,
    failures: Mutex<HashMap<&'static str, RemoteError>>,
    delays: Mutex<HashMap<String, Duration>>,
}

pub fn not_found(what: &str) -> RemoteError {
    RemoteError::Status {
        status: 404,
        message: format!("{} not found", what),
    }
}

impl FakeBoardService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board with the three default columns.
    pub fn seed_board(&self, name: &str) -> BoardId {
        let mut data = self.data.lock();
        let id = data.next_id();
        data.boards.push(Board::new(id, name, None));
        for (position, column) in ["To Do", "In Progress", "Done"].iter().enumerate() {
            let column_id = data.next_id();
            data.columns
                .push(Column::new(column_id, id, *column, position as i32));
        }
        id
    }

    pub fn seed_task(&self, column_id: ColumnId, title: &str) -> TaskId {
        let mut data = self.data.lock();
        let id = data.next_id();
        let position = data.tasks.iter().filter(|t| t.column_id == column_id).count() as i32;
        data.tasks
            .push(Task::new(id, column_id, title, position).with_created_at(Utc::now()));
        id
    }

    pub fn column_ids(&self, board_id: BoardId) -> Vec<ColumnId> {
        let data = self.data.lock();
        let mut columns: Vec<&Column> = data
            .columns
            .iter()
            .filter(|c| c.board_id == board_id)
            .collect();
        columns.sort_by_key(|c| c.position);
        columns.into_iter().map(|c| c.id).collect()
    }

    /// Server-side positions of a column, sorted.
    pub fn positions(&self, column_id: ColumnId) -> Vec<i32> {
        let data = self.data.lock();
        let mut positions: Vec<i32> = data
            .tasks
            .iter()
            .filter(|t| t.column_id == column_id)
            .map(|t| t.position)
            .collect();
        positions.sort();
        positions
    }

    pub fn fail(&self, op: &'static str, error: RemoteError) {
        self.failures.lock().insert(op, error);
    }

    pub fn recover(&self, op: &'static str) {
        self.failures.lock().remove(op);
    }

    /// Delays calls whose log entry matches `call`, e.g. `"get_board 3"`.
    pub fn delay(&self, call: impl Into<String>, duration: Duration) {
        self.delays.lock().insert(call.into(), duration);
    }

    /// Calls in the order they started.
    pub fn calls(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| e.strip_prefix("start ").map(str::to_string))
            .collect()
    }

    /// Start and end markers of every call.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.events.lock().clear();
    }

    async fn begin(&self, op: &'static str, call: String) -> RemoteResult<()> {
        self.events.lock().push(format!("start {}", call));
        let delay = self.delays.lock().get(&call).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let failure = self.failures.lock().get(op).cloned();
        match failure {
            Some(error) => {
                self.events.lock().push(format!("end {}", call));
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn end(&self, call: String) {
        self.events.lock().push(format!("end {}", call));
    }
}

#[async_trait]
impl BoardApi for FakeBoardService {
    async fn list_boards(&self) -> RemoteResult<Vec<Board>> {
        self.begin("list_boards", "list_boards".into()).await?;
        let boards = self.data.lock().boards.clone();
        self.end("list_boards".into());
        Ok(boards)
    }

    async fn get_board(&self, id: BoardId) -> RemoteResult<Board> {
        let call = format!("get_board {}", id);
        self.begin("get_board", call.clone()).await?;
        let board = self.data.lock().boards.iter().find(|b| b.id == id).cloned();
        self.end(call);
        board.ok_or_else(|| not_found("Board"))
    }

    async fn create_board(&self, input: BoardInput) -> RemoteResult<Board> {
        self.begin("create_board", "create_board".into()).await?;
        let id = self.seed_board(&input.name);
        let mut data = self.data.lock();
        let board = data
            .boards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("Board"))?;
        board.description = input.description;
        let board = board.clone();
        drop(data);
        self.end("create_board".into());
        Ok(board)
    }

    async fn update_board(&self, id: BoardId, input: BoardInput) -> RemoteResult<Board> {
        let call = format!("update_board {}", id);
        self.begin("update_board", call.clone()).await?;
        let updated = {
            let mut data = self.data.lock();
            data.boards.iter_mut().find(|b| b.id == id).map(|board| {
                board.name = input.name;
                board.description = input.description;
                board.clone()
            })
        };
        self.end(call);
        updated.ok_or_else(|| not_found("Board"))
    }

    async fn list_columns(&self, board_id: BoardId) -> RemoteResult<Vec<ColumnWithTasks>> {
        let call = format!("list_columns {}", board_id);
        self.begin("list_columns", call.clone()).await?;
        let column_ids = self.column_ids(board_id);
        let data = self.data.lock();
        let columns = column_ids
            .into_iter()
            .filter_map(|id| data.columns.iter().find(|c| c.id == id).cloned())
            .map(|column| {
                let mut tasks: Vec<Task> = data
                    .tasks
                    .iter()
                    .filter(|t| t.column_id == column.id)
                    .cloned()
                    .map(|mut t| {
                        // nested tasks come without their column id
                        t.column_id = 0;
                        t
                    })
                    .collect();
                tasks.sort_by_key(|t| t.position);
                ColumnWithTasks::new(column, tasks)
            })
            .collect();
        drop(data);
        self.end(call);
        Ok(columns)
    }

    async fn create_task(&self, input: TaskInput) -> RemoteResult<Task> {
        self.begin("create_task", "create_task".into()).await?;
        if !self.data.lock().columns.iter().any(|c| c.id == input.column_id) {
            return Err(not_found("Column"));
        }
        let id = self.seed_task(input.column_id, &input.title);
        let task = {
            let mut data = self.data.lock();
            let task = data
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| not_found("Task"))?;
            task.description = input.description;
            task.clone()
        };
        self.end("create_task".into());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, input: TaskInput) -> RemoteResult<Task> {
        let call = format!("update_task {}", id);
        self.begin("update_task", call.clone()).await?;
        let updated = {
            let mut data = self.data.lock();
            data.tasks.iter_mut().find(|t| t.id == id).map(|task| {
                task.title = input.title;
                task.description = input.description;
                task.clone()
            })
        };
        self.end(call);
        updated.ok_or_else(|| not_found("Task"))
    }

    async fn delete_task(&self, id: TaskId) -> RemoteResult<()> {
        let call = format!("delete_task {}", id);
        self.begin("delete_task", call.clone()).await?;
        {
            let mut data = self.data.lock();
            let index = data
                .tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| not_found("Task"))?;
            let removed = data.tasks.remove(index);
            for task in data.tasks.iter_mut() {
                if task.column_id == removed.column_id && task.position > removed.position {
                    task.position -= 1;
                }
            }
        }
        self.end(call);
        Ok(())
    }

    async fn move_task(&self, id: TaskId, target: TaskMove) -> RemoteResult<Task> {
        let call = format!("move_task {} -> {}@{}", id, target.column_id, target.position);
        self.begin("move_task", call.clone()).await?;
        let moved = {
            let mut data = self.data.lock();
            if !data.columns.iter().any(|c| c.id == target.column_id) {
                return Err(not_found("Target column"));
            }
            let (old_column, old_position) = data
                .tasks
                .iter()
                .find(|t| t.id == id)
                .map(|t| (t.column_id, t.position))
                .ok_or_else(|| not_found("Task"))?;

            for task in data.tasks.iter_mut().filter(|t| t.id != id) {
                if old_column == target.column_id {
                    if target.position > old_position
                        && task.column_id == old_column
                        && task.position > old_position
                        && task.position <= target.position
                    {
                        task.position -= 1;
                    } else if target.position < old_position
                        && task.column_id == old_column
                        && task.position >= target.position
                        && task.position < old_position
                    {
                        task.position += 1;
                    }
                } else if task.column_id == old_column && task.position > old_position {
                    task.position -= 1;
                } else if task.column_id == target.column_id && task.position >= target.position {
                    task.position += 1;
                }
            }

            let task = data
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| not_found("Task"))?;
            task.move_to_column(target.column_id, target.position);
            task.clone()
        };
        self.end(call);
        Ok(moved)
    }
}
