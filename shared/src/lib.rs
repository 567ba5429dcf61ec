//! Shared types for the on-leave status switcher
//!
//! Contains the platform identifiers, the static organization directory and
//! the logging setup used by every component.

pub mod directory;
pub mod errors;
pub mod logging;
pub mod types;

pub use directory::{AuditTarget, Directory, DirectoryConfig, GroupConfig, OrganizationConfig};
pub use errors::*;
pub use types::*;
