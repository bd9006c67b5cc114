use crate::{Board, BoardId, Column, ColumnId, ColumnWithTasks, Task, TaskId};

/// In-memory mirror of the active board.
///
/// Holds the board list for the selector, the current board, its columns in
/// server order and the flattened task list. No method here talks to the
/// network; the reconciler decides when to reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardStore {
    boards: Vec<Board>,
    current_board: Option<Board>,
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_boards(&mut self, boards: Vec<Board>) {
        self.boards = boards;
    }

    /// Makes `board` current and drops columns and tasks of the previous one.
    pub fn set_board(&mut self, board: Board) {
        self.current_board = Some(board);
        self.columns.clear();
        self.tasks.clear();
    }

    /// Forgets the current board, e.g. when the board list comes back empty.
    pub fn clear_board(&mut self) {
        self.current_board = None;
        self.columns.clear();
        self.tasks.clear();
    }

    /// Swaps the current board's metadata without touching its columns.
    pub fn replace_current_board(&mut self, board: Board) {
        match self.current_board {
            Some(ref current) if current.id == board.id => self.current_board = Some(board),
            _ => self.set_board(board),
        }
    }

    /// Replaces columns and tasks, stamping each nested task with its column id.
    pub fn set_columns_with_tasks(&mut self, columns: Vec<ColumnWithTasks>) {
        self.columns.clear();
        self.tasks.clear();
        for ColumnWithTasks { column, tasks } in columns {
            self.tasks.extend(tasks.into_iter().map(|mut task| {
                task.column_id = column.id;
                task
            }));
            self.columns.push(column);
        }
    }

    /// Full reload: board and columns land together.
    pub fn load(&mut self, board: Board, columns: Vec<ColumnWithTasks>) {
        self.set_board(board);
        self.set_columns_with_tasks(columns);
    }

    pub fn upsert_task(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Moves one task without renumbering its neighbours. Returns false when
    /// the task is not in the store.
    pub fn patch_task_position(&mut self, id: TaskId, column_id: ColumnId, position: i32) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.move_to_column(column_id, position);
                true
            }
            None => false,
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board_in_list(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn current_board(&self) -> Option<&Board> {
        self.current_board.as_ref()
    }

    pub fn current_board_id(&self) -> Option<BoardId> {
        self.current_board.as_ref().map(|b| b.id)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks_in_column(&self, column_id: ColumnId) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.column_id == column_id)
    }

    pub fn task_count(&self, column_id: ColumnId) -> usize {
        self.tasks_in_column(column_id).count()
    }
}
