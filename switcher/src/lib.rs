//! On-leave status switcher
//!
//! Reconciles a person's on-duty / on-leave markers across every group of
//! their organization from a single toggle request, applies the result per
//! group and reports what changed to the organization's audit channel.

pub mod core;
pub mod error;
pub mod services;
pub mod switcher_impl;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{SwitcherError, SwitcherResult};
pub use switcher_impl::Switcher;
pub use traits::*;
pub use types::*;
