//! # Genesis Installation
//!
//! The genesis computation is supplied by the caller through `GenesisInitFn`.
//! Installation stores whatever it returns in the object store and points the
//! chain head at it:
//!
//! ```text
//! GenesisInitFn ──GenesisBlock──→ ObjectStore::put ──Cid──→ datastore[/chain/head]
//! ```

use async_trait::async_trait;
use qc_02_block_storage::{Blockstore, ObjectStore, SharedStore, StorageError};
use shared_types::Cid;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::builder::{GenesisBlock, GenesisBuilder, GenesisConfig};
use super::GenesisError;

/// Datastore key holding the content id of the chain head.
pub const CHAIN_HEAD_KEY: &[u8] = b"/chain/head";

/// Computes the genesis block. May read or write the storage views it is
/// given; assumed deterministic.
#[async_trait]
pub trait GenesisInitFn: Send + Sync {
    async fn init_genesis(
        &self,
        ctx: &CancellationToken,
        blocks: &Blockstore,
        objects: &ObjectStore,
    ) -> Result<GenesisBlock, GenesisError>;
}

/// Plain functions and closures work as genesis computations.
#[async_trait]
impl<F> GenesisInitFn for F
where
    F: Fn(&Blockstore, &ObjectStore) -> Result<GenesisBlock, GenesisError> + Send + Sync,
{
    async fn init_genesis(
        &self,
        _ctx: &CancellationToken,
        blocks: &Blockstore,
        objects: &ObjectStore,
    ) -> Result<GenesisBlock, GenesisError> {
        self(blocks, objects)
    }
}

/// Genesis computed by `GenesisBuilder` from a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct DefaultGenesis {
    config: GenesisConfig,
}

impl DefaultGenesis {
    pub fn new(config: GenesisConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl GenesisInitFn for DefaultGenesis {
    async fn init_genesis(
        &self,
        _ctx: &CancellationToken,
        _blocks: &Blockstore,
        _objects: &ObjectStore,
    ) -> Result<GenesisBlock, GenesisError> {
        GenesisBuilder::new(self.config.clone()).build()
    }
}

/// Run `genesis`, store its block and record it as the chain head.
///
/// Checks `ctx` before the computation starts, races the computation against
/// it, and checks it again before anything is written.
pub async fn install_genesis(
    ctx: &CancellationToken,
    datastore: &SharedStore,
    blocks: &Blockstore,
    objects: &ObjectStore,
    genesis: &dyn GenesisInitFn,
) -> Result<Cid, GenesisError> {
    if ctx.is_cancelled() {
        return Err(GenesisError::Cancelled);
    }

    let block = tokio::select! {
        biased;
        _ = ctx.cancelled() => return Err(GenesisError::Cancelled),
        result = genesis.init_genesis(ctx, blocks, objects) => result?,
    };

    if ctx.is_cancelled() {
        return Err(GenesisError::Cancelled);
    }

    let cid = objects.put(&block)?;
    datastore
        .write()
        .put(CHAIN_HEAD_KEY, cid.as_bytes())
        .map_err(StorageError::from)?;

    info!(
        "[genesis] Installed genesis block 0x{}.. (chain {}) as {}",
        hex::encode(&block.header.block_hash[..4]),
        block.header.chain_id,
        cid
    );
    Ok(cid)
}

/// Content id recorded as the chain head, if any.
pub fn load_head(datastore: &SharedStore) -> Result<Option<Cid>, GenesisError> {
    let Some(bytes) = datastore
        .read()
        .get(CHAIN_HEAD_KEY)
        .map_err(StorageError::from)?
    else {
        debug!("[genesis] No chain head recorded");
        return Ok(None);
    };

    let cid = Cid::from_slice(&bytes).map_err(|e| StorageError::DatabaseError {
        message: format!("malformed chain head: {}", e),
    })?;
    Ok(Some(cid))
}
