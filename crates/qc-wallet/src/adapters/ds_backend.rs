//! # Datastore Backend
//!
//! Keeps wallet keys in a `KeyValueStore`:
//!
//! | Key | Value |
//! |-----|-------|
//! | `wallet/key/0x<address>` | `KeyInfo` as JSON |
//! | `wallet/order/<seq: u64 BE>` | 20 raw address bytes |
//!
//! Order entries sort by sequence number, so a prefix scan over
//! `wallet/order/` yields keys in insertion order. New entries always take
//! the sequence after the highest one stored, so gaps are never reused.

use std::collections::HashMap;

use qc_02_block_storage::{BatchOperation, SharedStore};
use shared_types::Address;
use tracing::debug;

use crate::domain::errors::WalletError;
use crate::domain::key_info::{KeyInfo, KeyType};
use crate::ports::WalletBackend;

/// Prefix of key record entries.
pub const KEY_PREFIX: &[u8] = b"wallet/key/";

/// Prefix of insertion-order entries.
pub const ORDER_PREFIX: &[u8] = b"wallet/order/";

/// Wallet backend over a shared datastore.
pub struct DsBackend {
    store: SharedStore,
    order: Vec<Address>,
    keys: HashMap<Address, KeyInfo>,
    next_seq: u64,
}

impl DsBackend {
    /// Open the backend, loading every record already in `store`.
    ///
    /// # Errors
    ///
    /// `CorruptRecord` if an order key or entry is malformed, points at a missing
    /// record, or the record's key does not derive the address it is stored
    /// under.
    pub fn open(store: SharedStore) -> Result<Self, WalletError> {
        let entries = store.read().prefix_scan(ORDER_PREFIX)?;

        let mut order = Vec::with_capacity(entries.len());
        let mut keys = HashMap::with_capacity(entries.len());
        let mut next_seq = 0u64;
        for (order_key, value) in entries {
            let seq = parse_seq(&order_key).ok_or_else(|| corrupt(&order_key, "bad sequence"))?;
            next_seq = seq
                .checked_add(1)
                .ok_or_else(|| corrupt(&order_key, "sequence exhausted"))?;

            let address = Address::from_slice(&value).map_err(|e| corrupt(&order_key, e))?;

            let record_key = record_key(&address);
            let bytes = store
                .read()
                .get(&record_key)?
                .ok_or_else(|| corrupt(&record_key, "missing key record"))?;
            let key: KeyInfo =
                serde_json::from_slice(&bytes).map_err(|e| corrupt(&record_key, e))?;
            let derived = key.address().map_err(|e| corrupt(&record_key, e))?;
            if derived != address {
                return Err(corrupt(
                    &record_key,
                    format!("key derives address {}", derived),
                ));
            }

            order.push(address);
            keys.insert(address, key);
        }

        debug!("[wallet] Opened backend with {} keys", order.len());
        Ok(Self {
            store,
            order,
            keys,
            next_seq,
        })
    }

    fn persist(&mut self, key: &KeyInfo) -> Result<Address, WalletError> {
        let address = key.address()?;
        if self.keys.contains_key(&address) {
            return Err(WalletError::DuplicateAddress(address));
        }

        let order_key = order_key(self.next_seq);

        self.store.write().atomic_batch_write(vec![
            BatchOperation::put(record_key(&address), serde_json::to_vec(key)?),
            BatchOperation::put(order_key, address.as_bytes().to_vec()),
        ])?;

        self.order.push(address);
        self.keys.insert(address, key.clone());
        self.next_seq += 1;
        debug!("[wallet] Stored {} key {}", key.key_type(), address);
        Ok(address)
    }
}

impl WalletBackend for DsBackend {
    fn addresses(&self) -> Vec<Address> {
        self.order.clone()
    }

    fn has_address(&self, address: &Address) -> bool {
        self.keys.contains_key(address)
    }

    fn new_key_info(&mut self) -> Result<KeyInfo, WalletError> {
        let key = KeyInfo::generate(KeyType::Secp256k1)?;
        self.persist(&key)?;
        Ok(key)
    }

    fn import(&mut self, key: &KeyInfo) -> Result<Address, WalletError> {
        self.persist(key)
    }

    fn key_info(&self, address: &Address) -> Result<KeyInfo, WalletError> {
        self.keys
            .get(address)
            .cloned()
            .ok_or(WalletError::UnknownAddress(*address))
    }
}

fn record_key(address: &Address) -> Vec<u8> {
    let mut key = KEY_PREFIX.to_vec();
    key.extend_from_slice(address.to_string().as_bytes());
    key
}

fn order_key(seq: u64) -> Vec<u8> {
    let mut key = ORDER_PREFIX.to_vec();
    key.extend_from_slice(&seq.to_be_bytes());
    key
}

fn parse_seq(order_key: &[u8]) -> Option<u64> {
    let raw = order_key.strip_prefix(ORDER_PREFIX)?;
    Some(u64::from_be_bytes(raw.try_into().ok()?))
}

fn corrupt(key: &[u8], reason: impl ToString) -> WalletError {
    WalletError::CorruptRecord {
        key: String::from_utf8_lossy(key).into_owned(),
        reason: reason.to_string(),
    }
}
