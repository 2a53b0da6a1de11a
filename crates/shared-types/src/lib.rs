//! # Shared Types Crate
//!
//! Value types that cross crate boundaries in the node.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address` and `Cid` are defined once here and
//!   used by block storage, the repository, the wallet and the runtime.
//! - **Human-readable on disk**: both types serialize as hex strings so they
//!   read naturally inside `config.json` and key files.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
