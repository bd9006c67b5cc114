use kanban_core::KanbanResult;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Write-to-temp-file then rename, so a crash never leaves a torn file.
pub struct AtomicWriter;

impl AtomicWriter {
    /// Creates missing parent directories before writing.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        // Temp file in the same directory keeps the rename on one filesystem
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        let temp_path = temp_file.path().to_path_buf();

        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, path).await?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Reads the whole file, or `None` if it does not exist.
    pub async fn read_optional(path: &Path) -> KanbanResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
