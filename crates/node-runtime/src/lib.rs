//! # Node Runtime Library
//!
//! Node bootstrap: everything between an empty repository and a node that
//! can start.
//!
//! - `genesis/` - Genesis block creation and installation
//! - `init/` - The bootstrap procedure (`init::init`) and its stages
//!
//! The `main.rs` binary wraps `init::init` in a CLI over a directory-backed
//! repository.

pub mod genesis;
pub mod init;

pub use genesis::{
    install_genesis, load_head, DefaultGenesis, GenesisBlock, GenesisBuilder, GenesisConfig,
    GenesisError, GenesisInitFn,
};
pub use init::{init, IdentityError, InitError, InitOpt, InitOptions};
