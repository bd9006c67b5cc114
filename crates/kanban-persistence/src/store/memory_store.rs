use crate::traits::SelectionStore;
use kanban_core::KanbanResult;
use kanban_domain::BoardId;
use parking_lot::Mutex;

/// Process-local selection store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    selected: Mutex<Option<BoardId>>,
    saves: Mutex<usize>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(board_id: BoardId) -> Self {
        Self {
            selected: Mutex::new(Some(board_id)),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

#[async_trait::async_trait]
impl SelectionStore for MemorySelectionStore {
    async fn save(&self, board_id: BoardId) -> KanbanResult<()> {
        *self.selected.lock() = Some(board_id);
        *self.saves.lock() += 1;
        Ok(())
    }

    async fn load(&self) -> KanbanResult<Option<BoardId>> {
        Ok(*self.selected.lock())
    }
}
