use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// File-backed key-value store.
///
/// The whole map lives in memory and is rewritten to disk on every mutation
/// via temp file + rename, so a crash leaves either the old or the new file.
/// Mutations are persisted before they become visible in memory.
///
/// On-disk format: `[key_len:u32 LE][key][value_len:u32 LE][value]...`
pub struct FileBackedKVStore {
    data: Entries,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, creating an empty one if the file is absent.
    ///
    /// A file that exists but cannot be parsed is reported as corruption
    /// rather than silently treated as empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::File::open(&path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes).map_err(io_error)?;
                let data = decode(&bytes)?;
                #[cfg(feature = "tracing-log")]
                tracing::debug!(
                    "[qc-02] Loaded {} keys from {} ({} bytes)",
                    data.len(),
                    path.display(),
                    bytes.len()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                #[cfg(feature = "tracing-log")]
                tracing::debug!("[qc-02] No existing storage file at {}", path.display());
                Entries::new()
            }
            Err(e) => return Err(io_error(e)),
        };

        Ok(Self { data, path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&mut self, next: Entries) -> Result<(), KVStoreError> {
        save(&self.path, &next)?;
        self.data = next;
        Ok(())
    }
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

fn read_u32(bytes: &[u8], cursor: &mut usize) -> Result<usize, KVStoreError> {
    let end = *cursor + 4;
    let raw: [u8; 4] = bytes
        .get(*cursor..end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| KVStoreError::CorruptionError {
            message: format!("truncated length field at offset {}", cursor),
        })?;
    *cursor = end;
    Ok(u32::from_le_bytes(raw) as usize)
}

fn read_chunk(bytes: &[u8], cursor: &mut usize, len: usize) -> Result<Vec<u8>, KVStoreError> {
    let end = *cursor + len;
    let chunk = bytes
        .get(*cursor..end)
        .ok_or_else(|| KVStoreError::CorruptionError {
            message: format!("truncated entry at offset {}", cursor),
        })?
        .to_vec();
    *cursor = end;
    Ok(chunk)
}

fn decode(bytes: &[u8]) -> Result<Entries, KVStoreError> {
    let mut data = Entries::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let key_len = read_u32(bytes, &mut cursor)?;
        let key = read_chunk(bytes, &mut cursor, key_len)?;
        let value_len = read_u32(bytes, &mut cursor)?;
        let value = read_chunk(bytes, &mut cursor, value_len)?;
        data.insert(key, value);
    }

    Ok(data)
}

fn save(path: &Path, data: &Entries) -> Result<(), KVStoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut bytes = Vec::new();
    for (key, value) in data {
        bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
        bytes.extend_from_slice(key);
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
        bytes.extend_from_slice(value);
    }

    let temp_path = path.with_extension("tmp");
    let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
    file.write_all(&bytes).map_err(io_error)?;
    file.sync_all().map_err(io_error)?;
    std::fs::rename(&temp_path, path).map_err(io_error)?;

    Ok(())
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        next.insert(key.to_vec(), value.to_vec());
        self.commit(next)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        if !self.data.contains_key(key) {
            return Ok(());
        }
        let mut next = self.data.clone();
        next.remove(key);
        self.commit(next)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    next.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    next.remove(&key);
                }
            }
        }
        self.commit(next)
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
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datastore.db");

        {
            let mut store = FileBackedKVStore::open(&path).unwrap();
            store.put(b"a", b"1").unwrap();
            store
                .atomic_batch_write(vec![
                    BatchOperation::put(b"b", b"2"),
                    BatchOperation::put(b"c", b""),
                ])
                .unwrap();
            store.delete(b"a").unwrap();
        }

        let store = FileBackedKVStore::open(&path).unwrap();
        assert_eq!(store.get(b"a").unwrap(), None);
        assert_eq!(store.get(b"b").unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.get(b"c").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBackedKVStore::open(dir.path().join("absent.db")).unwrap();
        assert!(store.prefix_scan(b"").unwrap().is_empty());
    }

    #[test]
    fn test_truncated_file_is_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datastore.db");
        std::fs::write(&path, [5u8, 0, 0, 0, b'k']).unwrap();

        assert!(matches!(
            FileBackedKVStore::open(&path),
            Err(KVStoreError::CorruptionError { .. })
        ));
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("datastore.db");
        let mut store = FileBackedKVStore::open(&path).unwrap();
        store.put(b"kept", b"1").unwrap();

        // Replace the parent directory with a file so the rewrite fails
        std::fs::remove_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub"), b"").unwrap();

        assert!(store.put(b"lost", b"2").is_err());
        assert!(!store.exists(b"lost").unwrap());
        assert!(store.exists(b"kept").unwrap());
    }
}
