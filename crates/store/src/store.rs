//! The shared store handle.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::state::State;

/// All collections behind one lock.
///
/// Cloning the handle is cheap; every clone sees the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the shared read guard.
    pub async fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().await
    }

    /// Takes the exclusive write guard. Held for the whole of a financial
    /// mutation, making the load-plan-commit sequence atomic.
    pub async fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().await
    }
}
