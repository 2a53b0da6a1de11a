//! # Adapters Module
//!
//! - `storage`: `KeyValueStore` implementations

pub mod storage;
