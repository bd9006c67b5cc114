pub mod age;
pub mod board;
pub mod column;
pub mod editable;
pub mod store;
pub mod task;
mod timestamp;

pub use age::{Age, AgeClass};
pub use board::{Board, BoardId, BoardInput};
pub use column::{Column, ColumnId, ColumnWithTasks};
pub use editable::Editable;
pub use store::BoardStore;
pub use task::{Task, TaskId, TaskInput, TaskMove};
