//! Common test utilities and infrastructure
//!
//! Shared fixtures, in-memory fakes and builders used across the switcher
//! integration tests.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::{InMemoryMembershipStore, RecordingSink, StaticCatalog, SwitcherBuilder, TestSwitcher};
