//! Service layer: per-account serialization and balance queries

pub mod account;
pub(crate) mod locks;

pub use account::*;
