//! # Repository Backends
//!
//! `Repository` is the port the node talks to; `MemRepo` and `FsRepo` are the
//! two adapters.

mod fs;
mod mem;

pub use fs::{FsRepo, REPO_VERSION};
pub use mem::MemRepo;

use std::sync::Arc;

use qc_02_block_storage::SharedStore;

use crate::config::NodeConfig;
use crate::errors::RepoError;
use crate::keystore::Keystore;

/// Persistent container for one node.
pub trait Repository: Send + Sync {
    /// Chain datastore (blocks, chain head).
    fn datastore(&self) -> SharedStore;

    /// Network identity key store.
    fn keystore(&self) -> Arc<dyn Keystore>;

    /// Datastore holding wallet key records.
    fn wallet_datastore(&self) -> SharedStore;

    /// Current configuration.
    fn config(&self) -> &NodeConfig;

    /// Mutable in-memory configuration. Changes are not persisted until
    /// `replace_config`.
    fn config_mut(&mut self) -> &mut NodeConfig;

    /// Persist `config` as the whole configuration, replacing the stored one.
    ///
    /// The in-memory copy is only updated once the write succeeded.
    fn replace_config(&mut self, config: NodeConfig) -> Result<(), RepoError>;
}
