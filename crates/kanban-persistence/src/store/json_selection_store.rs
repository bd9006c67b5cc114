use crate::store::atomic_writer::AtomicWriter;
use crate::traits::SelectionStore;
use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::BoardId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

/// Selection store backed by a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonSelectionStore {
    path: PathBuf,
}

/// On-disk layout of the selection file
#[derive(Debug, Serialize, Deserialize)]
struct SelectionEnvelope {
    version: u32,
    saved_at: DateTime<Utc>,
    selected_board_id: BoardId,
}

impl JsonSelectionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SelectionStore for JsonSelectionStore {
    async fn save(&self, board_id: BoardId) -> KanbanResult<()> {
        let envelope = SelectionEnvelope {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            selected_board_id: board_id,
        };
        let bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| KanbanError::Serialization(e.to_string()))?;

        AtomicWriter::write_atomic(&self.path, &bytes).await?;
        tracing::debug!("Saved selected board {} to {}", board_id, self.path.display());
        Ok(())
    }

    async fn load(&self) -> KanbanResult<Option<BoardId>> {
        let Some(bytes) = AtomicWriter::read_optional(&self.path).await? else {
            return Ok(None);
        };

        // A corrupt file only costs the remembered selection
        match serde_json::from_slice::<SelectionEnvelope>(&bytes) {
            Ok(envelope) if envelope.version == FORMAT_VERSION => {
                Ok(Some(envelope.selected_board_id))
            }
            Ok(envelope) => {
                tracing::warn!(
                    "Ignoring selection file {} with unsupported version {}",
                    self.path.display(),
                    envelope.version
                );
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable selection file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }
}
