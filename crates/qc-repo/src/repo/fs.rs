//! Directory-backed repository.
//!
//! ```text
//! <root>/
//!   version        layout version, plain text
//!   config.json    NodeConfig
//!   datastore.db   chain datastore
//!   wallet.db      wallet datastore
//!   keystore/      one file per identity key
//!   LOCK           held while the repository is open
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use qc_02_block_storage::{shared, FileBackedKVStore, SharedStore};
use tracing::{debug, info};

use super::Repository;
use crate::config::NodeConfig;
use crate::errors::RepoError;
use crate::keystore::{FsKeystore, Keystore};
use crate::lock::RepoLock;

/// On-disk layout version written by `FsRepo::init`.
pub const REPO_VERSION: u32 = 1;

const VERSION_FILE: &str = "version";
const CONFIG_FILE: &str = "config.json";
const DATASTORE_FILE: &str = "datastore.db";
const WALLET_FILE: &str = "wallet.db";
const KEYSTORE_DIR: &str = "keystore";

/// Repository stored in a directory.
pub struct FsRepo {
    root: PathBuf,
    datastore: SharedStore,
    keystore: Arc<FsKeystore>,
    wallet: SharedStore,
    config: NodeConfig,
    _lock: RepoLock,
}

impl FsRepo {
    /// Lay out an empty repository at `root` with `config` as its initial
    /// configuration. The directory may exist but must not hold a repository.
    pub fn init(root: impl AsRef<Path>, config: &NodeConfig) -> Result<(), RepoError> {
        let root = root.as_ref();
        if root.join(CONFIG_FILE).exists() {
            return Err(RepoError::AlreadyInitialized(root.to_path_buf()));
        }

        fs::create_dir_all(root.join(KEYSTORE_DIR))?;
        write_atomic(root, VERSION_FILE, format!("{}\n", REPO_VERSION).as_bytes())?;
        write_atomic(root, CONFIG_FILE, &serde_json::to_vec_pretty(config)?)?;

        info!("[repo] Initialized repository at {}", root.display());
        Ok(())
    }

    /// Open the repository at `root`, taking its process lock.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, RepoError> {
        let root = root.as_ref().to_path_buf();
        if !root.join(CONFIG_FILE).is_file() {
            return Err(RepoError::NotInitialized(root));
        }

        let found = fs::read_to_string(root.join(VERSION_FILE))?;
        if found.trim().parse::<u32>().ok() != Some(REPO_VERSION) {
            return Err(RepoError::VersionMismatch {
                found: found.trim().to_string(),
                expected: REPO_VERSION,
            });
        }

        let lock = RepoLock::acquire(&root)?;
        let config: NodeConfig = serde_json::from_slice(&fs::read(root.join(CONFIG_FILE))?)?;
        let datastore = FileBackedKVStore::open(root.join(DATASTORE_FILE))?;
        let wallet = FileBackedKVStore::open(root.join(WALLET_FILE))?;
        let keystore = FsKeystore::open(root.join(KEYSTORE_DIR))?;

        debug!("[repo] Opened repository at {}", root.display());
        Ok(Self {
            root,
            datastore: shared(datastore),
            keystore: Arc::new(keystore),
            wallet: shared(wallet),
            config,
            _lock: lock,
        })
    }

    /// Whether `root` holds a repository.
    pub fn is_initialized(root: impl AsRef<Path>) -> bool {
        root.as_ref().join(CONFIG_FILE).is_file()
    }

    /// Repository directory.
    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl Repository for FsRepo {
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
        write_atomic(&self.root, CONFIG_FILE, &serde_json::to_vec_pretty(&config)?)?;
        self.config = config;
        Ok(())
    }
}

/// Write `name` under `dir` via temp file + rename.
fn write_atomic(dir: &Path, name: &str, bytes: &[u8]) -> Result<(), RepoError> {
    let temp_path = dir.join(format!(".{}.tmp", name));
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&temp_path, dir.join(name))?;
    Ok(())
}
