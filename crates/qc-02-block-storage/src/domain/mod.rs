//! # Domain Layer
//!
//! - `errors` - Domain error types

pub mod errors;
