//! # Ports Layer
//!
//! - `outbound.rs` - Driven ports (the datastore the views are layered on)

pub mod outbound;
