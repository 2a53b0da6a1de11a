//! # Node Configuration
//!
//! Persisted as `config.json` inside the repository. Every section has sane
//! defaults, so a partial file loads with the missing fields filled in.
//!
//! The configuration is only ever written as a whole object (see
//! `Repository::replace_config`).

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Network configuration.
    pub network: NetworkConfig,
    /// API configuration.
    pub api: ApiConfig,
    /// Wallet configuration.
    pub wallet: WalletConfig,
}

/// Network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// P2P listening port.
    pub p2p_port: u16,
    /// Maximum peers in routing table.
    pub max_peers: usize,
    /// Bootstrap node addresses.
    pub bootstrap_nodes: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            p2p_port: 30303,
            max_peers: 50,
            bootstrap_nodes: Vec::new(),
        }
    }
}

/// API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// JSON-RPC listening port.
    pub rpc_port: u16,
    /// Chain ID reported to clients.
    pub chain_id: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            rpc_port: 8545,
            chain_id: 1,
        }
    }
}

/// Wallet configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Address used when a command does not name one. Set by initialization.
    pub default_address: Option<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.network.p2p_port, 30303);
        assert_eq!(config.api.rpc_port, 8545);
        assert_eq!(config.wallet.default_address, None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: NodeConfig =
            serde_json::from_str(r#"{ "network": { "p2p_port": 4001 } }"#).unwrap();

        assert_eq!(config.network.p2p_port, 4001);
        assert_eq!(config.network.max_peers, 50);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_default_address_json() {
        let mut config = NodeConfig::default();
        config.wallet.default_address = Some(Address::new([0x11; 20]));

        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("0x1111111111111111111111111111111111111111"));

        let back: NodeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
