//! Switcher services implementations

pub mod audit_sink;
pub mod discord_client;
pub mod group_catalog;
pub mod membership_store;

#[cfg(test)]
pub mod tests;

pub use audit_sink::*;
pub use discord_client::*;
pub use group_catalog::*;
pub use membership_store::*;
