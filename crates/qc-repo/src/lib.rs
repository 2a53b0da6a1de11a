//! # Node Repository
//!
//! A repository is the persistent container for one node:
//!
//! | Part | Type | Holds |
//! |------|------|-------|
//! | datastore | `SharedStore` | chain data (blocks, chain head) |
//! | keystore | `Keystore` | network identity keys |
//! | wallet datastore | `SharedStore` | wallet key records |
//! | config | `NodeConfig` | node configuration, replaced as a whole |
//!
//! ## Backends
//!
//! - `MemRepo` - everything in memory, for tests and throwaway nodes
//! - `FsRepo` - a directory on disk, guarded by an exclusive `LOCK` file
//!
//! ## Concurrency
//!
//! Repositories are not internally synchronized across operations. Callers
//! that mutate a repository must hold exclusive access to it (`&mut`), and
//! `FsRepo` refuses to open a directory another process already holds.

pub mod config;
pub mod errors;
pub mod keystore;
pub mod lock;
pub mod repo;

pub use config::{ApiConfig, NetworkConfig, NodeConfig, WalletConfig};
pub use errors::{KeystoreError, LockError, RepoError};
pub use keystore::{FsKeystore, Keystore, MemKeystore};
pub use lock::RepoLock;
pub use repo::{FsRepo, MemRepo, Repository, REPO_VERSION};
