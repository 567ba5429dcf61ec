//! Capability traits the switcher core depends on
//!
//! The core never talks to the hosting platform directly. These traits are
//! the seam: the Discord adapters in `services` implement them for live use,
//! and tests substitute mocks or in-memory fakes.

use std::collections::BTreeSet;

use async_trait::async_trait;
use shared::{ChannelId, GroupId, MarkerId, PersonId};

use crate::error::SwitcherResult;
use crate::types::{AuditMessage, Panel};

/// Read and replace a person's marker set within one group
#[mockall::automock]
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Current markers of the person, or `None` when they are not a member
    async fn current_markers(
        &self,
        person: &PersonId,
        group: &GroupId,
    ) -> SwitcherResult<Option<BTreeSet<MarkerId>>>;

    /// Replace the person's full marker set in one call
    async fn set_markers(
        &self,
        person: &PersonId,
        group: &GroupId,
        markers: &BTreeSet<MarkerId>,
    ) -> SwitcherResult<()>;
}

/// Display names for groups and markers
#[mockall::automock]
#[async_trait]
pub trait GroupCatalog: Send + Sync {
    async fn group_name(&self, group: &GroupId) -> Option<String>;

    async fn marker_name(&self, group: &GroupId, marker: &MarkerId) -> Option<String>;
}

/// Destination for audit records and switcher panels
#[mockall::automock]
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn deliver(&self, channel: &ChannelId, message: AuditMessage) -> SwitcherResult<()>;

    async fn post_panel(&self, channel: &ChannelId, panel: Panel) -> SwitcherResult<()>;
}
