//! Wallet key provisioning.

use qc_wallet::{KeyInfo, Wallet, WalletError};
use tracing::info;

use super::errors::InitError;

/// Generate a new default key, or import `supplied` as the default key.
pub fn provision_default_key(
    wallet: &mut Wallet,
    supplied: Option<KeyInfo>,
) -> Result<KeyInfo, WalletError> {
    match supplied {
        None => wallet.new_key_info(),
        Some(key) => {
            wallet.import(&key)?;
            Ok(key)
        }
    }
}

/// Import `keys` in order. Stops at the first failure; keys imported before
/// it stay in the wallet.
pub fn import_keys(wallet: &mut Wallet, keys: &[KeyInfo]) -> Result<(), InitError> {
    for (index, key) in keys.iter().enumerate() {
        wallet
            .import(key)
            .map_err(|source| InitError::KeyImport { index, source })?;
    }
    if !keys.is_empty() {
        info!("[init] Imported {} additional keys", keys.len());
    }
    Ok(())
}
