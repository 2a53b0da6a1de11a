use std::sync::Arc;

use qc_02_block_storage::{shared, InMemoryKVStore, SharedStore};

use super::Repository;
use crate::config::NodeConfig;
use crate::errors::RepoError;
use crate::keystore::{Keystore, MemKeystore};

/// Repository held entirely in memory.
pub struct MemRepo {
    datastore: SharedStore,
    keystore: Arc<MemKeystore>,
    wallet: SharedStore,
    config: NodeConfig,
    /// Number of completed `replace_config` calls.
    config_writes: usize,
}

impl MemRepo {
    pub fn new(config: NodeConfig) -> Self {
        Self {
            datastore: shared(InMemoryKVStore::new()),
            keystore: Arc::new(MemKeystore::new()),
            wallet: shared(InMemoryKVStore::new()),
            config,
            config_writes: 0,
        }
    }

    /// How many times the configuration has been persisted.
    pub fn config_writes(&self) -> usize {
        self.config_writes
    }
}

impl Default for MemRepo {
    fn default() -> Self {
        Self::new(NodeConfig::default())
    }
}

impl Repository for MemRepo {
    fn datastore(&self) -> SharedStore {
        Arc::clone(&self.datastore)
    }

    fn keystore(&self) -> Arc<dyn Keystore> {
        self.keystore.clone()
    }

    fn wallet_datastore(&self) -> SharedStore {
        Arc::clone(&self.wallet)
    }

    fn config(&self) -> &NodeConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut NodeConfig {
        &mut self.config
    }

    fn replace_config(&mut self, config: NodeConfig) -> Result<(), RepoError> {
        self.config = config;
        self.config_writes += 1;
        Ok(())
    }
}
