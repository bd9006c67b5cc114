pub mod locks;

use crate::confirm::{AlwaysConfirm, Confirm};
use crate::notification::{Notification, Notifier};
use crate::render::{render, BoardView};
use chrono::Utc;
use kanban_client::BoardApi;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{
    Board, BoardId, BoardInput, BoardStore, ColumnId, Editable, Task, TaskId, TaskInput, TaskMove,
};
use kanban_persistence::SelectionStore;
use locks::{EntityKey, EntityLocks};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const DELETE_TASK_PROMPT: &str = "Are you sure you want to delete this task?";

/// Which top-level surface the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Loading,
    Empty,
    Board,
}

/// Board to auto-select: the saved one if it still exists, else the first.
pub fn choose_board(boards: &[Board], saved: Option<BoardId>) -> Option<BoardId> {
    saved
        .filter(|id| boards.iter().any(|b| b.id == *id))
        .or_else(|| boards.first().map(|b| b.id))
}

/// Applies remote mutations to the local [`BoardStore`].
///
/// # Reconciliation strategy
///
/// - Board selection, task create and task update finish with a full reload
///   of the board's columns, so server-assigned ids and positions win.
/// - Task delete removes the task locally after the remote call succeeds.
/// - Task move patches only the moved task's column and position. Siblings in
///   the target column keep their old ranks until the next full reload; this
///   keeps drag-and-drop free of a refetch round trip.
///
/// A failed remote call leaves the store as it was and produces exactly one
/// error notification. Nothing is retried.
///
/// # Concurrency
///
/// Methods take `&self` and may overlap. The store lock is never held across
/// an `.await`. Mutations on the same task or board id are serialized through
/// [`EntityLocks`]. Board selections carry a sequence token: a completed
/// selection is applied unless a later-started one has already been applied,
/// so a newer selection that fails never discards an older one that succeeded.
pub struct Reconciler {
    api: Arc<dyn BoardApi>,
    selection: Arc<dyn SelectionStore>,
    confirm: Arc<dyn Confirm>,
    store: Mutex<BoardStore>,
    notifier: Mutex<Notifier>,
    view: Mutex<ViewState>,
    locks: EntityLocks,
    selection_seq: AtomicU64,
    applied_seq: AtomicU64,
    revision: AtomicU64,
}

impl Reconciler {
    pub fn new(api: Arc<dyn BoardApi>, selection: Arc<dyn SelectionStore>) -> Self {
        Self {
            api,
            selection,
            confirm: Arc::new(AlwaysConfirm),
            store: Mutex::new(BoardStore::new()),
            notifier: Mutex::new(Notifier::new()),
            view: Mutex::new(ViewState::Loading),
            locks: EntityLocks::new(),
            selection_seq: AtomicU64::new(0),
            applied_seq: AtomicU64::new(0),
            revision: AtomicU64::new(0),
        }
    }

    pub fn with_confirm(mut self, confirm: Arc<dyn Confirm>) -> Self {
        self.confirm = confirm;
        self
    }

    pub fn read<R>(&self, f: impl FnOnce(&BoardStore) -> R) -> R {
        f(&self.store.lock())
    }

    pub fn snapshot(&self) -> BoardStore {
        self.store.lock().clone()
    }

    pub fn view_state(&self) -> ViewState {
        *self.view.lock()
    }

    /// Bumped on every store change; adapters re-render when it moves.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn render(&self) -> BoardView {
        self.read(|store| render(store, Utc::now()))
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifier.lock().history().iter().cloned().collect()
    }

    pub fn visible_notification(&self) -> Option<Notification> {
        self.notifier.lock().visible().cloned()
    }

    pub fn dismiss_notification(&self) {
        self.notifier.lock().dismiss();
    }

    /// Form values for editing a task that is on the current board.
    pub fn task_for_edit(&self, id: TaskId) -> Option<TaskInput> {
        self.read(|store| store.task(id).map(TaskInput::from_entity))
    }

    /// Fetches the board list and selects the remembered board, falling back
    /// to the first one. Returns the board that ended up current, or `None` for
    /// the empty state.
    pub async fn load_boards(&self) -> KanbanResult<Option<BoardId>> {
        let result = self.load_boards_inner().await;
        self.report(result, None)
    }

    /// Fetches the board list without selecting a board.
    pub async fn refresh_boards(&self) -> KanbanResult<()> {
        let result = self.fetch_boards().await;
        self.report(result, None)
    }

    /// Full reload of one board. `None` or a non-positive id is a no-op.
    pub async fn select_board(&self, id: Option<BoardId>) -> KanbanResult<()> {
        let Some(id) = id.filter(|id| *id > 0) else {
            tracing::debug!("select_board called without a board id");
            return Ok(());
        };
        let result = self.select_board_inner(id).await;
        self.report(result, None)
    }

    pub async fn create_task(&self, input: TaskInput) -> KanbanResult<Task> {
        let result = self.create_task_inner(input).await;
        self.report(result, Some("Task created successfully!"))
    }

    pub async fn update_task(&self, id: TaskId, input: TaskInput) -> KanbanResult<Task> {
        let result = self.update_task_inner(id, input).await;
        self.locks.prune();
        self.report(result, Some("Task updated successfully!"))
    }

    /// Asks for confirmation first; a declined prompt returns `Ok(false)`
    /// without contacting the service.
    pub async fn delete_task(&self, id: TaskId) -> KanbanResult<bool> {
        if !self.confirm.confirm(DELETE_TASK_PROMPT).await {
            tracing::debug!(task_id = id, "task deletion declined");
            return Ok(false);
        }
        let result = self.delete_task_inner(id).await;
        self.locks.prune();
        self.report(result, Some("Task deleted successfully!"))
            .map(|_| true)
    }

    pub async fn move_task(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        position: i32,
    ) -> KanbanResult<Task> {
        let result = self.move_task_inner(task_id, column_id, position).await;
        self.locks.prune();
        match result {
            Ok(task) => {
                self.notifier.lock().success("Task moved successfully!");
                Ok(task)
            }
            Err(e) => {
                self.notifier
                    .lock()
                    .error(format!("Failed to move task: {}", e.user_message()));
                Err(e)
            }
        }
    }

    pub async fn create_board(&self, input: BoardInput) -> KanbanResult<Board> {
        let result = self.create_board_inner(input).await;
        self.report(result, Some("Board created successfully!"))
    }

    pub async fn update_board(&self, id: BoardId, input: BoardInput) -> KanbanResult<Board> {
        let result = self.update_board_inner(id, input).await;
        self.locks.prune();
        self.report(result, Some("Board updated successfully!"))
    }

    async fn load_boards_inner(&self) -> KanbanResult<Option<BoardId>> {
        let boards = match self.api.list_boards().await {
            Ok(boards) => boards,
            Err(e) => {
                self.set_view(ViewState::Empty);
                return Err(e.into());
            }
        };
        tracing::debug!(count = boards.len(), "boards fetched");
        self.mutate(|store| store.set_boards(boards));

        let saved = match self.selection.load().await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Could not read saved board selection: {}", e);
                None
            }
        };

        match self.read(|store| choose_board(store.boards(), saved)) {
            Some(id) => {
                self.select_board_inner(id).await?;
                Ok(self.read(|store| store.current_board_id()))
            }
            None => {
                tracing::info!("No boards available");
                self.mutate(|store| store.clear_board());
                self.set_view(ViewState::Empty);
                Ok(None)
            }
        }
    }

    async fn fetch_boards(&self) -> KanbanResult<()> {
        let boards = self.api.list_boards().await?;
        tracing::debug!(count = boards.len(), "boards fetched");
        self.mutate(|store| store.set_boards(boards));
        Ok(())
    }

    async fn select_board_inner(&self, id: BoardId) -> KanbanResult<()> {
        let token = self.selection_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_view(ViewState::Loading);

        let (board, columns) = match self.fetch_board(id).await {
            Ok(fetched) => fetched,
            Err(e) => {
                if self.is_latest_selection(token) {
                    self.settle_view();
                }
                return Err(e);
            }
        };

        let task_count: usize = columns.iter().map(|c| c.tasks.len()).sum();
        // checked and claimed under the store lock
        let applied = self.mutate(|store| {
            if token <= self.applied_seq.load(Ordering::SeqCst) {
                return false;
            }
            self.applied_seq.store(token, Ordering::SeqCst);
            store.load(board, columns);
            true
        });
        if !applied {
            tracing::debug!(board_id = id, "discarding superseded board selection");
            return Ok(());
        }
        self.set_view(ViewState::Board);
        tracing::info!(board_id = id, task_count, "board loaded");

        if let Err(e) = self.selection.save(id).await {
            tracing::warn!(board_id = id, "Could not remember board selection: {}", e);
        }
        Ok(())
    }

    async fn fetch_board(
        &self,
        id: BoardId,
    ) -> KanbanResult<(Board, Vec<kanban_domain::ColumnWithTasks>)> {
        let board = self.api.get_board(id).await?;
        let columns = self.api.list_columns(id).await?;
        Ok((board, columns))
    }

    /// Replaces columns and tasks unless another board was selected meanwhile.
    async fn reload_columns(&self, board_id: BoardId) -> KanbanResult<()> {
        let columns = self.api.list_columns(board_id).await?;
        let applied = self.mutate(|store| {
            if store.current_board_id() == Some(board_id) {
                store.set_columns_with_tasks(columns);
                true
            } else {
                false
            }
        });
        if !applied {
            tracing::debug!(board_id, "board changed during reload; keeping newer state");
        }
        Ok(())
    }

    async fn create_task_inner(&self, input: TaskInput) -> KanbanResult<Task> {
        let input = input.normalized()?;
        let board_id = self.require_board()?;
        self.require_column(input.column_id)?;

        let created = self.api.create_task(input).await?;
        self.reload_columns(board_id).await?;

        Ok(self
            .read(|store| store.task(created.id).cloned())
            .unwrap_or(created))
    }

    async fn update_task_inner(&self, id: TaskId, input: TaskInput) -> KanbanResult<Task> {
        let input = input.normalized()?;
        let board_id = self.require_board()?;
        self.require_column(input.column_id)?;

        let _guard = self.locks.acquire(EntityKey::Task(id)).await;
        let updated = self.api.update_task(id, input).await?;
        self.reload_columns(board_id).await?;

        Ok(self.read(|store| store.task(id).cloned()).unwrap_or(updated))
    }

    async fn delete_task_inner(&self, id: TaskId) -> KanbanResult<()> {
        let _guard = self.locks.acquire(EntityKey::Task(id)).await;
        self.api.delete_task(id).await?;
        if self.mutate(|store| store.remove_task(id)).is_none() {
            tracing::debug!(task_id = id, "deleted task was not in the local store");
        }
        Ok(())
    }

    async fn move_task_inner(
        &self,
        task_id: TaskId,
        column_id: ColumnId,
        position: i32,
    ) -> KanbanResult<Task> {
        self.require_column(column_id)?;

        let _guard = self.locks.acquire(EntityKey::Task(task_id)).await;
        let moved = self
            .api
            .move_task(task_id, TaskMove { column_id, position })
            .await?;

        let patched = self
            .mutate(|store| store.patch_task_position(task_id, moved.column_id, moved.position));
        if !patched {
            tracing::warn!(task_id, "moved task is not in the local store");
        }
        Ok(self.read(|store| store.task(task_id).cloned()).unwrap_or(moved))
    }

    async fn create_board_inner(&self, input: BoardInput) -> KanbanResult<Board> {
        let input = input.normalized()?;
        let created = self.api.create_board(input).await?;

        self.fetch_boards().await?;
        self.select_board_inner(created.id).await?;
        Ok(created)
    }

    async fn update_board_inner(&self, id: BoardId, input: BoardInput) -> KanbanResult<Board> {
        let input = input.normalized()?;

        let _guard = self.locks.acquire(EntityKey::Board(id)).await;
        let updated = self.api.update_board(id, input).await?;
        let boards = self.api.list_boards().await?;

        let was_current = self.mutate(|store| {
            store.set_boards(boards);
            if store.current_board_id() == Some(id) {
                store.replace_current_board(updated.clone());
                true
            } else {
                false
            }
        });
        if !was_current {
            self.select_board_inner(id).await?;
        }
        Ok(updated)
    }

    fn require_board(&self) -> KanbanResult<BoardId> {
        self.read(|store| store.current_board_id())
            .ok_or_else(|| KanbanError::Validation("No board selected".to_string()))
    }

    fn require_column(&self, column_id: ColumnId) -> KanbanResult<()> {
        if self.read(|store| store.column(column_id).is_some()) {
            Ok(())
        } else {
            Err(KanbanError::NotFound(format!("Column {}", column_id)))
        }
    }

    fn is_latest_selection(&self, token: u64) -> bool {
        self.selection_seq.load(Ordering::SeqCst) == token
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut BoardStore) -> R) -> R {
        let result = f(&mut self.store.lock());
        self.revision.fetch_add(1, Ordering::SeqCst);
        result
    }

    fn set_view(&self, view: ViewState) {
        *self.view.lock() = view;
    }

    fn settle_view(&self) {
        let view = if self.read(|store| store.current_board().is_some()) {
            ViewState::Board
        } else {
            ViewState::Empty
        };
        self.set_view(view);
    }

    fn report<T>(&self, result: KanbanResult<T>, success: Option<&str>) -> KanbanResult<T> {
        match result {
            Ok(value) => {
                if let Some(message) = success {
                    self.notifier.lock().success(message);
                }
                Ok(value)
            }
            Err(e) => {
                self.notifier.lock().error(e.user_message());
                Err(e)
            }
        }
    }
}
