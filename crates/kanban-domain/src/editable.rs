use crate::{Board, BoardInput, Task, TaskInput};

/// Form payloads that can be prefilled from an existing entity.
pub trait Editable<T> {
    fn from_entity(entity: &T) -> Self;
}

impl Editable<Board> for BoardInput {
    fn from_entity(board: &Board) -> Self {
        Self {
            name: board.name.clone(),
            description: board.description.clone(),
        }
    }
}

impl Editable<Task> for TaskInput {
    fn from_entity(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            column_id: task.column_id,
        }
    }
}
