use std::path::PathBuf;

use tempfile::{TempDir, tempdir};

use crate::{
    storage::{config::StoreConfig, pager::Pager, storage_manager::GraphStore},
    types::error::DatabaseError,
};

/// Graph store rooted in a temporary directory that is removed on drop.
pub struct TempGraph {
    pub dir: TempDir,
    pub config: StoreConfig,
}

impl TempGraph {
    pub fn new() -> Result<Self, DatabaseError> {
        Self::with_prefix("mobilegraph_test")
    }

    pub fn with_prefix(prefix: &str) -> Result<Self, DatabaseError> {
        let dir = tempdir()?;
        let config = StoreConfig::with_base_path(dir.path().join(prefix));
        Ok(Self { dir, config })
    }

    pub fn open(&self) -> Result<GraphStore, DatabaseError> {
        GraphStore::open(self.config.clone())
    }

    /// Path for a standalone store file inside the temporary directory.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn pager(&self, name: &str, capacity: usize) -> Result<Pager, DatabaseError> {
        Pager::open(self.file_path(name), capacity)
    }
}
