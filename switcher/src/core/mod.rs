//! Switcher core logic

pub mod applicator;
pub mod reader;
pub mod reconciler;
pub mod reporter;

pub use applicator::Applicator;
pub use reader::MemberStateReader;
pub use reconciler::{action_for, compute_actions, decide, decide_from, desired_markers};
pub use reporter::AuditReporter;
