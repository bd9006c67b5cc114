use crate::state::Reconciler;
use kanban_core::KanbanResult;
use kanban_domain::{BoardStore, ColumnId, Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging(TaskId),
}

/// Element a drag event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A column's task list
    Zone(ColumnId),
    /// Anything else (headers, buttons, outside the board)
    Outside,
}

impl DropTarget {
    pub fn column_id(&self) -> Option<ColumnId> {
        match self {
            DropTarget::Zone(id) => Some(*id),
            DropTarget::Outside => None,
        }
    }
}

/// Move a drop resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    pub task_id: TaskId,
    pub column_id: ColumnId,
    pub position: i32,
}

/// Tracks one drag gesture.
///
/// Keyed by task and column ids only, so the controller survives any number
/// of re-renders and re-bindings.
#[derive(Debug)]
pub struct DragController {
    state: DragState,
    highlighted: Option<ColumnId>,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            highlighted: None,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragged_task(&self) -> Option<TaskId> {
        match self.state {
            DragState::Dragging(id) => Some(id),
            DragState::Idle => None,
        }
    }

    /// Column currently showing the drag-over affordance.
    pub fn highlighted(&self) -> Option<ColumnId> {
        self.highlighted
    }

    pub fn drag_start(&mut self, task_id: TaskId) {
        tracing::debug!(task_id, "drag start");
        self.state = DragState::Dragging(task_id);
        self.highlighted = None;
    }

    /// Whether the target accepts the dragged task.
    pub fn drag_over(&self, target: DropTarget) -> bool {
        self.dragged_task().is_some() && target.column_id().is_some()
    }

    pub fn drag_enter(&mut self, target: DropTarget) -> bool {
        if !self.drag_over(target) {
            return false;
        }
        self.highlighted = target.column_id();
        true
    }

    pub fn drag_leave(&mut self, target: DropTarget) {
        if target.column_id().is_some() && target.column_id() == self.highlighted {
            self.highlighted = None;
        }
    }

    /// Resolves a drop against the current store and returns to `Idle`.
    ///
    /// Drops always append: the position is the number of tasks the target
    /// column holds right now. A drop without an active drag, outside a drop
    /// zone, or on a column the store does not know is ignored.
    pub fn plan_drop(&mut self, target: DropTarget, store: &BoardStore) -> Option<MoveIntent> {
        let task_id = self.dragged_task()?;
        let column_id = target.column_id()?;
        if store.column(column_id).is_none() {
            tracing::warn!(column_id, "drop on a column that is not on the current board");
            return None;
        }

        let position = store.task_count(column_id) as i32;
        self.state = DragState::Idle;
        self.highlighted = None;

        Some(MoveIntent {
            task_id,
            column_id,
            position,
        })
    }

    /// Plans the drop and sends the move through the reconciler.
    pub async fn drop_on(
        &mut self,
        target: DropTarget,
        reconciler: &Reconciler,
    ) -> KanbanResult<Option<Task>> {
        let Some(intent) = reconciler.read(|store| self.plan_drop(target, store)) else {
            tracing::debug!(?target, "drop ignored");
            return Ok(None);
        };
        tracing::debug!(
            task_id = intent.task_id,
            column_id = intent.column_id,
            position = intent.position,
            "drop"
        );
        reconciler
            .move_task(intent.task_id, intent.column_id, intent.position)
            .await
            .map(Some)
    }

    /// Ends the gesture whether or not a drop happened.
    pub fn drag_end(&mut self) {
        self.state = DragState::Idle;
        self.highlighted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::{Board, Column, ColumnWithTasks};

    fn store() -> BoardStore {
        let mut store = BoardStore::new();
        store.load(
            Board::new(1, "Main", None),
            vec![
                ColumnWithTasks::new(
                    Column::new(10, 1, "To Do", 0),
                    vec![Task::new(1, 0, "a", 0), Task::new(2, 0, "b", 1)],
                ),
                ColumnWithTasks::new(
                    Column::new(20, 1, "Done", 1),
                    vec![
                        Task::new(3, 0, "c", 0),
                        Task::new(4, 0, "d", 1),
                        Task::new(5, 0, "e", 2),
                    ],
                ),
            ],
        );
        store
    }

    #[test]
    fn test_drop_appends_to_target_column() {
        let store = store();
        let mut dnd = DragController::new();
        dnd.drag_start(1);

        let intent = dnd.plan_drop(DropTarget::Zone(20), &store).unwrap();
        assert_eq!(
            intent,
            MoveIntent {
                task_id: 1,
                column_id: 20,
                position: 3
            }
        );
        assert_eq!(dnd.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_on_own_column_counts_itself() {
        let store = store();
        let mut dnd = DragController::new();
        dnd.drag_start(1);

        let intent = dnd.plan_drop(DropTarget::Zone(10), &store).unwrap();
        assert_eq!(intent.position, 2);
    }

    #[test]
    fn test_drop_without_drag_is_noop() {
        let store = store();
        let mut dnd = DragController::new();
        assert!(dnd.plan_drop(DropTarget::Zone(20), &store).is_none());
        assert_eq!(dnd.state(), DragState::Idle);
    }

    #[test]
    fn test_drop_outside_zone_is_noop() {
        let store = store();
        let mut dnd = DragController::new();
        dnd.drag_start(2);

        assert!(dnd.plan_drop(DropTarget::Outside, &store).is_none());
        assert!(dnd.plan_drop(DropTarget::Zone(99), &store).is_none());
        // still dragging until drag end
        assert_eq!(dnd.state(), DragState::Dragging(2));

        dnd.drag_end();
        assert_eq!(dnd.state(), DragState::Idle);
    }

    #[test]
    fn test_highlight_follows_enter_and_leave() {
        let mut dnd = DragController::new();
        assert!(!dnd.drag_enter(DropTarget::Zone(10)));
        assert_eq!(dnd.highlighted(), None);

        dnd.drag_start(1);
        assert!(!dnd.drag_enter(DropTarget::Outside));
        assert!(dnd.drag_enter(DropTarget::Zone(10)));
        assert_eq!(dnd.highlighted(), Some(10));

        dnd.drag_leave(DropTarget::Zone(20));
        assert_eq!(dnd.highlighted(), Some(10));
        dnd.drag_leave(DropTarget::Zone(10));
        assert_eq!(dnd.highlighted(), None);
    }

    #[test]
    fn test_drag_end_clears_affordance() {
        let mut dnd = DragController::new();
        dnd.drag_start(1);
        dnd.drag_enter(DropTarget::Zone(20));
        dnd.drag_end();

        assert_eq!(dnd.state(), DragState::Idle);
        assert_eq!(dnd.highlighted(), None);
        assert!(!dnd.drag_over(DropTarget::Zone(20)));
    }
}
