use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};

pub type BoardId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Board {
    pub fn new(id: BoardId, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Body of `POST /boards/` and `PUT /boards/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardInput {
    pub name: String,
    pub description: Option<String>,
}

impl BoardInput {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Trims fields and turns a blank description into `None`.
    pub fn normalized(self) -> KanbanResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(KanbanError::Validation("Board name is required".to_string()));
        }
        Ok(Self {
            name,
            description: crate::task::blank_to_none(self.description),
        })
    }
}
