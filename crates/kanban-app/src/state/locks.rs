use kanban_domain::{BoardId, TaskId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Task(TaskId),
    Board(BoardId),
}

/// One async mutex per entity, so mutations on the same id run in order
/// while different ids proceed concurrently.
#[derive(Debug, Default)]
pub struct EntityLocks {
    locks: Mutex<HashMap<EntityKey, Arc<AsyncMutex<()>>>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: EntityKey) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            locks
                .entry(key)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drops locks nobody holds or waits on.
    pub fn prune(&self) {
        self.locks.lock().retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
