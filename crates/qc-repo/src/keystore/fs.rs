use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use shared_crypto::PeerKeyPair;

use super::{validate_name, Keystore};
use crate::errors::KeystoreError;

/// Directory-backed key store: one PKCS#1 DER file per key name.
pub struct FsKeystore {
    dir: PathBuf,
}

impl FsKeystore {
    /// Use `dir` as the key directory, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, KeystoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn key_path(&self, name: &str) -> Result<PathBuf, KeystoreError> {
        validate_name(name)?;
        Ok(self.dir.join(name))
    }
}

impl Keystore for FsKeystore {
    fn has(&self, name: &str) -> Result<bool, KeystoreError> {
        Ok(self.key_path(name)?.is_file())
    }

    fn put(&self, name: &str, key: &PeerKeyPair) -> Result<(), KeystoreError> {
        let path = self.key_path(name)?;
        let der = key.to_bytes()?;

        let temp_path = self.dir.join(format!(".{}.tmp", name));
        let mut file = fs::File::create(&temp_path)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(&der)?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn get(&self, name: &str) -> Result<PeerKeyPair, KeystoreError> {
        let path = self.key_path(name)?;
        let der = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(KeystoreError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(PeerKeyPair::from_bytes(&der)?)
    }

    fn delete(&self, name: &str) -> Result<(), KeystoreError> {
        let path = self.key_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(KeystoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>, KeystoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                // Skips in-flight temp files
                if validate_name(name).is_ok() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
