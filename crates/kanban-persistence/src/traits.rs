use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::BoardId;

/// Key-value bridge that remembers which board was selected last.
///
/// Read once at startup, written after every successful selection.
#[async_trait]
pub trait SelectionStore: Send + Sync {
    async fn save(&self, board_id: BoardId) -> KanbanResult<()>;

    /// `None` when nothing has been saved yet
    async fn load(&self) -> KanbanResult<Option<BoardId>>;
}
