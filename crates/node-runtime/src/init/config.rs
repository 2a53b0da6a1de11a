//! Default address commit.

use qc_repo::Repository;
use qc_wallet::KeyInfo;
use shared_types::Address;
use tracing::info;

use super::errors::InitError;

/// Point `wallet.default_address` at `default_key` and persist the whole
/// configuration.
///
/// The in-memory configuration is updated first, so it holds the new address
/// even when the write fails.
pub fn commit_default_address<R>(repo: &mut R, default_key: &KeyInfo) -> Result<Address, InitError>
where
    R: Repository + ?Sized,
{
    let address = default_key
        .address()
        .map_err(InitError::AddressDerivation)?;

    repo.config_mut().wallet.default_address = Some(address);
    let config = repo.config().clone();
    repo.replace_config(config)
        .map_err(InitError::ConfigPersist)?;

    info!("[init] Default wallet address {}", address);
    Ok(address)
}
