//! Network identity provisioning.

use qc_repo::Keystore;
use shared_crypto::{KeyAlgorithm, PeerKeyPair};
use tracing::info;

use super::errors::IdentityError;

/// Scheme of generated peer keys.
pub const PEER_KEY_ALGORITHM: KeyAlgorithm = KeyAlgorithm::Rsa;

/// Modulus size of generated peer keys.
pub const DEFAULT_PEER_KEY_BITS: usize = 2048;

/// Key store alias of the node's own identity.
pub const SELF_KEY_ALIAS: &str = "self";

/// Store `supplied`, or a freshly generated key, as the node identity.
///
/// Always overwrites whatever is stored under `SELF_KEY_ALIAS`.
pub fn provision_peer_key(
    keystore: &dyn Keystore,
    supplied: Option<PeerKeyPair>,
) -> Result<(), IdentityError> {
    let key = match supplied {
        Some(key) => key,
        None => {
            info!(
                "[init] Generating {}-bit {} peer key",
                DEFAULT_PEER_KEY_BITS, PEER_KEY_ALGORITHM
            );
            PeerKeyPair::generate(PEER_KEY_ALGORITHM, DEFAULT_PEER_KEY_BITS)
                .map_err(IdentityError::Generate)?
        }
    };

    keystore
        .put(SELF_KEY_ALIAS, &key)
        .map_err(IdentityError::Store)?;

    if let Ok(peer_id) = key.peer_id() {
        info!("[init] Peer identity {}", hex::encode(peer_id));
    }
    Ok(())
}
