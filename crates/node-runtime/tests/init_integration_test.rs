//! End-to-end bootstrap tests against in-memory and on-disk repositories.

use std::io;
use std::sync::Arc;

use node_runtime::genesis::{load_head, DefaultGenesis, GenesisBlock, GenesisConfig, GenesisError};
use node_runtime::init::{init, IdentityError, InitError, InitOptions, SELF_KEY_ALIAS};
use qc_02_block_storage::{Blockstore, ObjectStore, SharedStore};
use qc_repo::{
    FsRepo, Keystore, KeystoreError, MemRepo, NodeConfig, RepoError, Repository,
};
use qc_wallet::{DsBackend, KeyInfo, KeyType, WalletBackend, WalletError, ORDER_PREFIX};
use shared_crypto::{KeyAlgorithm, PeerKeyPair};
use tokio_util::sync::CancellationToken;

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

fn genesis() -> DefaultGenesis {
    DefaultGenesis::new(GenesisConfig {
        timestamp: Some(1_700_000_000),
        ..Default::default()
    })
}

fn failing_genesis(_: &Blockstore, _: &ObjectStore) -> Result<GenesisBlock, GenesisError> {
    Err(GenesisError::Computation("no genesis for you".into()))
}

/// Small keys keep the tests fast; production keys come from `init` itself.
fn peer_key() -> PeerKeyPair {
    PeerKeyPair::generate(KeyAlgorithm::Rsa, 1024).unwrap()
}

fn wallet_key() -> KeyInfo {
    KeyInfo::generate(KeyType::Secp256k1).unwrap()
}

fn wallet_addresses(repo: &dyn Repository) -> Vec<shared_types::Address> {
    DsBackend::open(repo.wallet_datastore()).unwrap().addresses()
}

fn is_empty(store: &SharedStore) -> bool {
    store.read().prefix_scan(b"").unwrap().is_empty()
}

/// Key store whose writes always fail.
struct ReadOnlyKeystore;

impl Keystore for ReadOnlyKeystore {
    fn has(&self, _: &str) -> Result<bool, KeystoreError> {
        Ok(false)
    }
    fn put(&self, _: &str, _: &PeerKeyPair) -> Result<(), KeystoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into())
    }
    fn get(&self, name: &str) -> Result<PeerKeyPair, KeystoreError> {
        Err(KeystoreError::NotFound(name.to_string()))
    }
    fn delete(&self, name: &str) -> Result<(), KeystoreError> {
        Err(KeystoreError::NotFound(name.to_string()))
    }
    fn list(&self) -> Result<Vec<String>, KeystoreError> {
        Ok(Vec::new())
    }
}

/// `MemRepo` with injectable key store and config write failures.
struct FaultyRepo {
    inner: MemRepo,
    keystore: Option<Arc<dyn Keystore>>,
    fail_config_write: bool,
}

impl FaultyRepo {
    fn new() -> Self {
        Self {
            inner: MemRepo::default(),
            keystore: None,
            fail_config_write: false,
        }
    }
}

impl Repository for FaultyRepo {
    fn datastore(&self) -> SharedStore {
        self.inner.datastore()
    }
    fn keystore(&self) -> Arc<dyn Keystore> {
        self.keystore
            .clone()
            .unwrap_or_else(|| self.inner.keystore())
    }
    fn wallet_datastore(&self) -> SharedStore {
        self.inner.wallet_datastore()
    }
    fn config(&self) -> &NodeConfig {
        self.inner.config()
    }
    fn config_mut(&mut self) -> &mut NodeConfig {
        self.inner.config_mut()
    }
    fn replace_config(&mut self, config: NodeConfig) -> Result<(), RepoError> {
        if self.fail_config_write {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full").into());
        }
        self.inner.replace_config(config)
    }
}

// ----------------------------------------------------------------------------
// Successful runs
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_default_run_generates_everything() {
    let mut repo = MemRepo::default();

    init(&CancellationToken::new(), &mut repo, &genesis(), InitOptions::default())
        .await
        .unwrap();

    let keystore = repo.keystore();
    assert_eq!(keystore.list().unwrap(), vec![SELF_KEY_ALIAS.to_string()]);
    assert_eq!(keystore.get(SELF_KEY_ALIAS).unwrap().bits(), 2048);

    let addresses = wallet_addresses(&repo);
    assert_eq!(addresses.len(), 1);
    assert_eq!(repo.config().wallet.default_address, Some(addresses[0]));
    assert_eq!(repo.config_writes(), 1);

    assert!(load_head(&repo.datastore()).unwrap().is_some());
}

#[tokio::test]
async fn test_supplied_peer_key_stored_verbatim() {
    let mut repo = MemRepo::default();
    let key = peer_key();

    init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new().peer_key(key.clone()),
    )
    .await
    .unwrap();

    let stored = repo.keystore().get(SELF_KEY_ALIAS).unwrap();
    assert_eq!(*stored.to_bytes().unwrap(), *key.to_bytes().unwrap());
}

#[tokio::test]
async fn test_supplied_default_key_is_imported() {
    let mut repo = MemRepo::default();
    let default = KeyInfo::generate(KeyType::Bls).unwrap();
    let expected = default.address().unwrap();

    init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new().peer_key(peer_key()).default_key(default.clone()),
    )
    .await
    .unwrap();

    let backend = DsBackend::open(repo.wallet_datastore()).unwrap();
    assert_eq!(backend.addresses(), vec![expected]);
    assert_eq!(backend.key_info(&expected).unwrap(), default);
    assert_eq!(repo.config().wallet.default_address, Some(expected));
}

#[tokio::test]
async fn test_imports_follow_default_key_in_order() {
    let mut repo = MemRepo::default();
    let imports: Vec<KeyInfo> = (0..3).map(|_| wallet_key()).collect();

    let mut options = InitOptions::new().peer_key(peer_key());
    for key in &imports {
        options = options.import_key(key.clone());
    }
    init(&CancellationToken::new(), &mut repo, &genesis(), options)
        .await
        .unwrap();

    let addresses = wallet_addresses(&repo);
    assert_eq!(addresses.len(), 1 + imports.len());
    assert_eq!(repo.config().wallet.default_address, Some(addresses[0]));
    for (key, address) in imports.iter().zip(&addresses[1..]) {
        assert_eq!(key.address().unwrap(), *address);
    }
}

#[tokio::test]
async fn test_other_config_fields_preserved() {
    let mut config = NodeConfig::default();
    config.network.p2p_port = 4001;
    config.network.bootstrap_nodes = vec!["10.0.0.1:30303".into()];
    let mut repo = MemRepo::new(config.clone());

    init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new().peer_key(peer_key()),
    )
    .await
    .unwrap();

    assert_eq!(repo.config().network, config.network);
    assert_eq!(repo.config().api, config.api);
}

#[tokio::test]
async fn test_second_run_replaces_peer_identity() {
    let mut repo = MemRepo::default();
    let original = peer_key();

    init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new().peer_key(original.clone()),
    )
    .await
    .unwrap();
    init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new().peer_key(peer_key()),
    )
    .await
    .unwrap();

    let keystore = repo.keystore();
    assert_eq!(keystore.list().unwrap().len(), 1);
    assert_ne!(keystore.get(SELF_KEY_ALIAS).unwrap(), original);
    // Each run adds its own default key
    assert_eq!(wallet_addresses(&repo).len(), 2);
}

// ----------------------------------------------------------------------------
// Failures
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_genesis_failure_touches_nothing() {
    let mut repo = MemRepo::default();
    let before = repo.config().clone();

    let err = init(
        &CancellationToken::new(),
        &mut repo,
        &failing_genesis,
        InitOptions::new().peer_key(peer_key()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, InitError::Genesis(GenesisError::Computation(_))));
    assert!(repo.keystore().list().unwrap().is_empty());
    assert!(is_empty(&repo.wallet_datastore()));
    assert!(is_empty(&repo.datastore()));
    assert_eq!(repo.config(), &before);
    assert_eq!(repo.config_writes(), 0);
}

#[tokio::test]
async fn test_cancelled_run_touches_nothing() {
    let mut repo = MemRepo::default();
    let ctx = CancellationToken::new();
    ctx.cancel();

    let err = init(&ctx, &mut repo, &genesis(), InitOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, InitError::Genesis(GenesisError::Cancelled)));
    assert!(repo.keystore().list().unwrap().is_empty());
    assert!(is_empty(&repo.datastore()));
}

#[tokio::test]
async fn test_identity_failure_keeps_genesis() {
    let mut repo = FaultyRepo::new();
    repo.keystore = Some(Arc::new(ReadOnlyKeystore));

    let err = init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new().peer_key(peer_key()),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        InitError::Identity(IdentityError::Store(KeystoreError::Io(_)))
    ));
    assert!(load_head(&repo.datastore()).unwrap().is_some());
    assert!(is_empty(&repo.wallet_datastore()));
}

#[tokio::test]
async fn test_wallet_open_failure_keeps_identity_and_genesis() {
    let mut repo = MemRepo::default();
    let mut order_key = ORDER_PREFIX.to_vec();
    order_key.extend_from_slice(&0u64.to_be_bytes());
    repo.wallet_datastore()
        .write()
        .put(&order_key, b"not an address")
        .unwrap();

    let err = init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new().peer_key(peer_key()),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        InitError::WalletOpen(WalletError::CorruptRecord { .. })
    ));
    assert!(repo.keystore().has(SELF_KEY_ALIAS).unwrap());
    assert!(load_head(&repo.datastore()).unwrap().is_some());
    assert_eq!(repo.config().wallet.default_address, None);
}

#[tokio::test]
async fn test_malformed_default_key_fails_provisioning() {
    let mut repo = MemRepo::default();

    let err = init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new()
            .peer_key(peer_key())
            .default_key(KeyInfo::new(KeyType::Secp256k1, vec![0u8; 32])),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, InitError::KeyProvision(WalletError::InvalidKey(_))));
    assert!(repo.keystore().has(SELF_KEY_ALIAS).unwrap());
    assert!(is_empty(&repo.wallet_datastore()));
}

#[tokio::test]
async fn test_import_stops_at_first_malformed_key() {
    let mut repo = MemRepo::default();
    let good_before = wallet_key();
    let good_after = wallet_key();

    let options = InitOptions::new()
        .peer_key(peer_key())
        .import_key(good_before.clone())
        .import_key(KeyInfo::new(KeyType::Bls, vec![1, 2, 3]))
        .import_key(good_after.clone());
    let err = init(&CancellationToken::new(), &mut repo, &genesis(), options)
        .await
        .unwrap_err();

    match err {
        InitError::KeyImport { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(source, WalletError::InvalidKey(_)));
        }
        other => panic!("expected KeyImport, got {other:?}"),
    }

    let addresses = wallet_addresses(&repo);
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses[1], good_before.address().unwrap());
    assert!(!addresses.contains(&good_after.address().unwrap()));
    assert_eq!(repo.config_writes(), 0);
}

#[tokio::test]
async fn test_duplicate_import_reports_position() {
    let mut repo = MemRepo::default();
    let default = wallet_key();

    let err = init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new()
            .peer_key(peer_key())
            .default_key(default.clone())
            .import_key(default),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        InitError::KeyImport {
            index: 0,
            source: WalletError::DuplicateAddress(_)
        }
    ));
}

#[tokio::test]
async fn test_config_write_failure_keeps_wallet() {
    let mut repo = FaultyRepo::new();
    repo.fail_config_write = true;

    let err = init(
        &CancellationToken::new(),
        &mut repo,
        &genesis(),
        InitOptions::new().peer_key(peer_key()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, InitError::ConfigPersist(RepoError::Io(_))));
    assert_eq!(wallet_addresses(&repo).len(), 1);
    assert_eq!(repo.inner.config_writes(), 0);
}

// ----------------------------------------------------------------------------
// On-disk repository
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_fs_repo_bootstrap_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let default = wallet_key();
    let expected = default.address().unwrap();

    FsRepo::init(dir.path(), &NodeConfig::default()).unwrap();
    {
        let mut repo = FsRepo::open(dir.path()).unwrap();
        init(
            &CancellationToken::new(),
            &mut repo,
            &genesis(),
            InitOptions::new()
                .peer_key(peer_key())
                .default_key(default)
                .import_key(wallet_key()),
        )
        .await
        .unwrap();
    }

    let repo = FsRepo::open(dir.path()).unwrap();
    assert_eq!(repo.config().wallet.default_address, Some(expected));
    assert!(repo.keystore().has(SELF_KEY_ALIAS).unwrap());
    assert_eq!(wallet_addresses(&repo)[0], expected);
    assert_eq!(wallet_addresses(&repo).len(), 2);

    let head = load_head(&repo.datastore()).unwrap().unwrap();
    let objects = ObjectStore::new(Blockstore::new(repo.datastore()));
    let block: GenesisBlock = objects.get(&head).unwrap();
    assert_eq!(block.header.height, 0);
}
