//! # Repository Bootstrap
//!
//! Turns a freshly created repository into a usable node, in a fixed order:
//!
//! ```text
//! storage views → genesis → peer identity → open wallet
//!     → default key → imported keys → default address → config write
//! ```
//!
//! ## Failure Model
//!
//! The first failing stage is returned as an `InitError` naming that stage.
//! Nothing is retried or rolled back: stages that completed before the failure
//! stay applied, later stages never run.
//!
//! ## Concurrency
//!
//! `init` writes the key store, wallet datastore and configuration without
//! any locking of its own. The caller must hold the repository exclusively
//! for the whole call. Only genesis installation observes `ctx`.

pub mod config;
pub mod errors;
pub mod peer;
pub mod wallet;

pub use config::commit_default_address;
pub use errors::{IdentityError, InitError};
pub use peer::{provision_peer_key, DEFAULT_PEER_KEY_BITS, PEER_KEY_ALGORITHM, SELF_KEY_ALIAS};
pub use wallet::{import_keys, provision_default_key};

use qc_02_block_storage::{Blockstore, ObjectStore};
use qc_repo::Repository;
use qc_wallet::{DsBackend, KeyInfo, Wallet};
use shared_crypto::PeerKeyPair;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::genesis::{install_genesis, GenesisInitFn};

/// What `init` provisions instead of generating.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Network identity to store. Generated when `None`.
    pub peer_key: Option<PeerKeyPair>,
    /// Default wallet key to import. Generated when `None`.
    pub default_key: Option<KeyInfo>,
    /// Additional wallet keys, imported in order after the default key.
    pub import_keys: Vec<KeyInfo>,
}

/// One option, for building `InitOptions` from a list.
#[derive(Debug, Clone)]
pub enum InitOpt {
    PeerKey(PeerKeyPair),
    DefaultKey(KeyInfo),
    ImportKey(KeyInfo),
}

impl InitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `key` as the peer identity. Replaces any earlier choice.
    pub fn peer_key(mut self, key: PeerKeyPair) -> Self {
        self.peer_key = Some(key);
        self
    }

    /// Use `key` as the default wallet key. Replaces any earlier choice.
    pub fn default_key(mut self, key: KeyInfo) -> Self {
        self.default_key = Some(key);
        self
    }

    /// Append `key` to the import list.
    pub fn import_key(mut self, key: KeyInfo) -> Self {
        self.import_keys.push(key);
        self
    }

    /// Apply one option in place.
    pub fn apply(&mut self, opt: InitOpt) {
        match opt {
            InitOpt::PeerKey(key) => self.peer_key = Some(key),
            InitOpt::DefaultKey(key) => self.default_key = Some(key),
            InitOpt::ImportKey(key) => self.import_keys.push(key),
        }
    }
}

impl Extend<InitOpt> for InitOptions {
    fn extend<I: IntoIterator<Item = InitOpt>>(&mut self, opts: I) {
        for opt in opts {
            self.apply(opt);
        }
    }
}

impl FromIterator<InitOpt> for InitOptions {
    fn from_iter<I: IntoIterator<Item = InitOpt>>(opts: I) -> Self {
        let mut options = Self::default();
        options.extend(opts);
        options
    }
}

/// Bootstrap `repo`: install genesis, provision the peer identity and wallet,
/// and commit the default wallet address to the configuration.
pub async fn init<R>(
    ctx: &CancellationToken,
    repo: &mut R,
    genesis: &dyn GenesisInitFn,
    options: InitOptions,
) -> Result<(), InitError>
where
    R: Repository + ?Sized,
{
    let InitOptions {
        peer_key,
        default_key,
        import_keys: extra_keys,
    } = options;

    let datastore = repo.datastore();
    let blocks = Blockstore::new(datastore.clone());
    let objects = ObjectStore::new(blocks.clone());

    install_genesis(ctx, &datastore, &blocks, &objects, genesis)
        .await
        .map_err(InitError::Genesis)?;

    provision_peer_key(repo.keystore().as_ref(), peer_key).map_err(InitError::Identity)?;

    let backend = DsBackend::open(repo.wallet_datastore()).map_err(InitError::WalletOpen)?;
    let mut wallet = Wallet::new(backend);

    let default_key =
        provision_default_key(&mut wallet, default_key).map_err(InitError::KeyProvision)?;

    import_keys(&mut wallet, &extra_keys)?;

    let address = commit_default_address(repo, &default_key)?;

    info!(
        "[init] Repository initialized ({} wallet keys, default {})",
        wallet.addresses().len(),
        address
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qc_wallet::KeyType;
    use shared_crypto::KeyAlgorithm;

    fn wallet_key() -> KeyInfo {
        KeyInfo::generate(KeyType::Secp256k1).unwrap()
    }

    #[test]
    fn test_builder_last_wins_imports_append() {
        let peer_a = PeerKeyPair::generate(KeyAlgorithm::Rsa, 1024).unwrap();
        let peer_b = PeerKeyPair::generate(KeyAlgorithm::Rsa, 1024).unwrap();
        let (default_a, default_b) = (wallet_key(), wallet_key());
        let (import_a, import_b) = (wallet_key(), wallet_key());

        let options = InitOptions::new()
            .peer_key(peer_a)
            .import_key(import_a.clone())
            .default_key(default_a)
            .peer_key(peer_b.clone())
            .default_key(default_b.clone())
            .import_key(import_b.clone());

        assert_eq!(options.peer_key, Some(peer_b));
        assert_eq!(options.default_key, Some(default_b));
        assert_eq!(options.import_keys, vec![import_a, import_b]);
    }

    #[test]
    fn test_from_option_list() {
        let (first, second, default) = (wallet_key(), wallet_key(), wallet_key());

        let options: InitOptions = vec![
            InitOpt::ImportKey(first.clone()),
            InitOpt::DefaultKey(default.clone()),
            InitOpt::ImportKey(second.clone()),
        ]
        .into_iter()
        .collect();

        assert!(options.peer_key.is_none());
        assert_eq!(options.default_key, Some(default));
        assert_eq!(options.import_keys, vec![first, second]);
    }

    #[test]
    fn test_empty_options_generate_everything() {
        let options = InitOptions::default();
        assert!(options.peer_key.is_none());
        assert!(options.default_key.is_none());
        assert!(options.import_keys.is_empty());
    }
}
