use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};

use crate::column::ColumnId;

pub type TaskId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub column_id: ColumnId,
    pub position: i32,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: TaskId, column_id: ColumnId, title: impl Into<String>, position: i32) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            column_id,
            position,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn move_to_column(&mut self, column_id: ColumnId, position: i32) {
        self.column_id = column_id;
        self.position = position;
    }
}

/// Body of `POST /tasks/` and `PUT /tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub column_id: ColumnId,
}

impl TaskInput {
    pub fn new(title: impl Into<String>, description: Option<String>, column_id: ColumnId) -> Self {
        Self {
            title: title.into(),
            description,
            column_id,
        }
    }

    /// Trims fields and turns a blank description into `None`.
    pub fn normalized(self) -> KanbanResult<Self> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(KanbanError::Validation("Task title is required".to_string()));
        }
        Ok(Self {
            title,
            description: blank_to_none(self.description),
            column_id: self.column_id,
        })
    }
}

/// Body of `POST /tasks/{id}/move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMove {
    pub column_id: ColumnId,
    pub position: i32,
}

pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_column() {
        let mut task = Task::new(1, 10, "Ship it", 3);
        task.move_to_column(20, 0);
        assert_eq!(task.column_id, 20);
        assert_eq!(task.position, 0);
    }

    #[test]
    fn test_task_input_serializes_null_description() {
        let input = TaskInput::new("Fix login", Some(String::new()), 5)
            .normalized()
            .unwrap();
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["title"], "Fix login");
        assert!(json["description"].is_null());
        assert_eq!(json["column_id"], 5);
    }

    #[test]
    fn test_task_input_rejects_empty_title() {
        let result = TaskInput::new(" \t", None, 5).normalized();
        assert!(matches!(result, Err(KanbanError::Validation(_))));
    }

    #[test]
    fn test_move_body_shape() {
        let body = TaskMove {
            column_id: 3,
            position: 2,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"column_id":3,"position":2}"#
        );
    }
}
