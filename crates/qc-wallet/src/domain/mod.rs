pub mod errors;
pub mod key_info;
