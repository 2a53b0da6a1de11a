use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use std::collections::BTreeMap;

/// In-memory key-value store for tests and ephemeral repositories.
///
/// Ordered map so prefix scans come back sorted by key.
#[derive(Default)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        // Infallible, so sequential application is all-or-nothing
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        let results: Vec<_> = self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_and_delete() {
        let mut store = InMemoryKVStore::new();

        store.put(b"/chain/head", b"genesis").unwrap();
        store.put(b"/chain/head", b"next").unwrap();
        assert_eq!(store.get(b"/chain/head").unwrap(), Some(b"next".to_vec()));
        assert_eq!(store.len(), 1);

        store.delete(b"/chain/head").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get(b"/chain/head").unwrap(), None);
    }

    #[test]
    fn test_batch_applies_in_order() {
        let mut store = InMemoryKVStore::new();
        store.put(b"tmp", b"x").unwrap();

        store
            .atomic_batch_write(vec![
                BatchOperation::put(b"k", b"1"),
                BatchOperation::delete(b"tmp"),
                BatchOperation::put(b"k", b"2"),
            ])
            .unwrap();

        assert_eq!(store.get(b"k").unwrap(), Some(b"2".to_vec()));
        assert!(!store.exists(b"tmp").unwrap());
    }

    #[test]
    fn test_prefix_scan_stops_at_prefix_boundary() {
        let mut store = InMemoryKVStore::new();
        store.put(b"wallet/order/\x00\x01", b"b").unwrap();
        store.put(b"wallet/order/\x00\x00", b"a").unwrap();
        store.put(b"wallet/orders", b"other").unwrap();
        store.put(b"wallet/key/x", b"k").unwrap();

        let order = store.prefix_scan(b"wallet/order/").unwrap();
        let values: Vec<_> = order.into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![b"a".to_vec(), b"b".to_vec()]);
        assert!(store.prefix_scan(b"nothing/").unwrap().is_empty());
    }
}
