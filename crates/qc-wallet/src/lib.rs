//! # Wallet
//!
//! Spending keys for a node.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - `KeyInfo`, `KeyType`, errors
//! - `ports/` - The `WalletBackend` port
//! - `adapters/` - `DsBackend`, records kept in a `KeyValueStore`
//! - `wallet.rs` - The `Wallet` facade used by the rest of the node
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Address Binding | A record is stored under the address derived from its own key |
//! | 2 | Insertion Order | `addresses()` lists keys in the order they entered the wallet |
//! | 3 | No Duplicates | Importing a key whose address is present is rejected |
//! | 4 | Atomic Records | A record and its order entry are written in one batch |

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod wallet;

pub use adapters::ds_backend::{DsBackend, KEY_PREFIX, ORDER_PREFIX};
pub use domain::errors::WalletError;
pub use domain::key_info::{KeyInfo, KeyType};
pub use ports::WalletBackend;
pub use wallet::Wallet;
