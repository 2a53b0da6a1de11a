//! # Block Storage (qc-02)
//!
//! Content-addressed chain storage layered over a raw key-value datastore.
//!
//! ## Layers
//!
//! ```text
//! ObjectStore   typed objects  ──bincode──→ bytes
//!      │
//!      ↓
//! Blockstore    bytes ──BLAKE3──→ Cid, key = /blocks/<cid>
//!      │
//!      ↓
//! KeyValueStore raw keys/values (in-memory or file-backed)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Content Addressing | A block is stored under the BLAKE3 digest of its bytes |
//! | 2 | Data Integrity | Digest re-verified on every read |
//! | 3 | Atomic Writes | Batch writes apply all operations or none |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Error types
//! - `ports/` - The `KeyValueStore` driven port
//! - `adapters/` - In-memory and file-backed datastores
//! - `blockstore.rs`, `object_store.rs` - Storage views
//!
//! ## Usage
//!
//! ```ignore
//! use qc_02_block_storage::{shared, Blockstore, InMemoryKVStore, ObjectStore};
//!
//! let datastore = shared(InMemoryKVStore::new());
//! let objects = ObjectStore::new(Blockstore::new(datastore));
//! let cid = objects.put(&"hello")?;
//! let back: String = objects.get(&cid)?;
//! ```

pub mod adapters;
pub mod blockstore;
pub mod domain;
pub mod object_store;
pub mod ports;

// Re-export key types for convenience
pub use adapters::storage::{FileBackedKVStore, InMemoryKVStore};
pub use blockstore::Blockstore;
pub use domain::errors::{KVStoreError, StorageError};
pub use object_store::ObjectStore;
pub use ports::outbound::{shared, BatchOperation, KeyValueStore, ScanResult, SharedStore};
