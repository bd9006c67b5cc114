use serde::{Deserialize, Serialize};

use crate::board::BoardId;
use crate::task::Task;

pub type ColumnId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub name: String,
    pub position: i32,
}

impl Column {
    pub fn new(id: ColumnId, board_id: BoardId, name: impl Into<String>, position: i32) -> Self {
        Self {
            id,
            board_id,
            name: name.into(),
            position,
        }
    }
}

/// Element of `GET /columns/board/{id}`: a column with its tasks nested.
///
/// Nested tasks carry no `column_id`; the store fills it in when flattening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnWithTasks {
    #[serde(flatten)]
    pub column: Column,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl ColumnWithTasks {
    pub fn new(column: Column, tasks: Vec<Task>) -> Self {
        Self { column, tasks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_tasks_without_column_id() {
        let json = r#"{
            "id": 7, "name": "Doing", "position": 1, "board_id": 2,
            "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00",
            "tasks": [
                {"id": 11, "title": "Write docs", "description": null, "position": 0,
                 "created_at": "2024-01-02T08:00:00", "updated_at": "2024-01-02T08:00:00"}
            ]
        }"#;
        let column: ColumnWithTasks = serde_json::from_str(json).unwrap();
        assert_eq!(column.column.id, 7);
        assert_eq!(column.tasks.len(), 1);
        assert_eq!(column.tasks[0].column_id, 0);
        assert!(column.tasks[0].created_at.is_some());
    }

    #[test]
    fn test_missing_tasks_list_is_empty() {
        let json = r#"{"id": 1, "name": "To Do", "position": 0, "board_id": 2}"#;
        let column: ColumnWithTasks = serde_json::from_str(json).unwrap();
        assert!(column.tasks.is_empty());
    }
}
