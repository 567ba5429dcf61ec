//! In-memory fakes and builder patterns for switcher tests

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use shared::{ChannelId, GroupId, MarkerId, PersonId};
use switcher::{
    AuditMessage, AuditRecord, AuditSink, GroupCatalog, MembershipStore, Panel, Switcher,
    SwitcherError, SwitcherResult,
};
use tokio::sync::RwLock;

use super::fixtures::TestFixtures;

/// Membership store holding marker sets in memory
#[derive(Default)]
pub struct InMemoryMembershipStore {
    members: RwLock<HashMap<(GroupId, PersonId), BTreeSet<MarkerId>>>,
    failing_writes: HashSet<GroupId>,
    unreadable: HashSet<GroupId>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, group: &GroupId, person: &PersonId, markers: BTreeSet<MarkerId>) -> Self {
        self.members
            .get_mut()
            .insert((group.clone(), person.clone()), markers);
        self
    }

    pub fn failing_writes_in(mut self, group: &GroupId) -> Self {
        self.failing_writes.insert(group.clone());
        self
    }

    pub fn unreadable(mut self, group: &GroupId) -> Self {
        self.unreadable.insert(group.clone());
        self
    }

    pub async fn markers_of(&self, group: &GroupId, person: &PersonId) -> Option<BTreeSet<MarkerId>> {
        self.members
            .read()
            .await
            .get(&(group.clone(), person.clone()))
            .cloned()
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn current_markers(
        &self,
        person: &PersonId,
        group: &GroupId,
    ) -> SwitcherResult<Option<BTreeSet<MarkerId>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.unreadable.contains(group) {
            return Err(SwitcherError::PlatformStatus {
                status: 502,
                path: format!("/guilds/{group}/members/{person}"),
            });
        }
        Ok(self.markers_of(group, person).await)
    }

    async fn set_markers(
        &self,
        person: &PersonId,
        group: &GroupId,
        markers: &BTreeSet<MarkerId>,
    ) -> SwitcherResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.failing_writes.contains(group) {
            return Err(SwitcherError::PlatformStatus {
                status: 403,
                path: format!("/guilds/{group}/members/{person}"),
            });
        }
        self.members
            .write()
            .await
            .insert((group.clone(), person.clone()), markers.clone());
        Ok(())
    }
}

/// Catalog answering from fixed name tables
pub struct StaticCatalog {
    groups: HashMap<GroupId, String>,
    markers: HashMap<(GroupId, MarkerId), String>,
}

impl StaticCatalog {
    pub fn from_fixtures() -> Self {
        Self {
            groups: TestFixtures::group_names()
                .into_iter()
                .map(|(id, name)| (GroupId::new(id), name.to_string()))
                .collect(),
            markers: TestFixtures::marker_names()
                .into_iter()
                .map(|(group, marker, name)| {
                    ((GroupId::new(group), MarkerId::new(marker)), name.to_string())
                })
                .collect(),
        }
    }
}

#[async_trait]
impl GroupCatalog for StaticCatalog {
    async fn group_name(&self, group: &GroupId) -> Option<String> {
        self.groups.get(group).cloned()
    }

    async fn marker_name(&self, group: &GroupId, marker: &MarkerId) -> Option<String> {
        self.markers.get(&(group.clone(), marker.clone())).cloned()
    }
}

/// Sink remembering every delivery, optionally failing each one
#[derive(Clone, Default)]
pub struct RecordingSink {
    delivered: Arc<RwLock<Vec<(ChannelId, AuditMessage)>>>,
    panels: Arc<RwLock<Vec<(ChannelId, Panel)>>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn delivered(&self) -> Vec<(ChannelId, AuditMessage)> {
        self.delivered.read().await.clone()
    }

    pub async fn panels(&self) -> Vec<(ChannelId, Panel)> {
        self.panels.read().await.clone()
    }

    /// The single toggle record delivered so far
    pub async fn toggle_record(&self) -> AuditRecord {
        let records: Vec<AuditRecord> = self
            .delivered()
            .await
            .into_iter()
            .filter_map(|(_, message)| match message {
                AuditMessage::Toggle(record) => Some(record),
                _ => None,
            })
            .collect();
        assert_eq!(records.len(), 1, "expected exactly one toggle record");
        records.into_iter().next().unwrap()
    }
}

#[async_trait]
impl AuditSink for RecordingSink {
    async fn deliver(&self, channel: &ChannelId, message: AuditMessage) -> SwitcherResult<()> {
        self.delivered.write().await.push((channel.clone(), message));
        if self.fail {
            return Err(SwitcherError::PlatformStatus {
                status: 500,
                path: format!("/channels/{channel}/messages"),
            });
        }
        Ok(())
    }

    async fn post_panel(&self, channel: &ChannelId, panel: Panel) -> SwitcherResult<()> {
        self.panels.write().await.push((channel.clone(), panel));
        Ok(())
    }
}

pub type TestSwitcher = Switcher<InMemoryMembershipStore, StaticCatalog, RecordingSink>;

/// Builder pattern for creating test switchers with sensible defaults
pub struct SwitcherBuilder {
    store: InMemoryMembershipStore,
    sink: RecordingSink,
}

impl SwitcherBuilder {
    pub fn new() -> Self {
        Self {
            store: InMemoryMembershipStore::new(),
            sink: RecordingSink::new(),
        }
    }

    /// Give the fixture person these markers in a group
    pub fn with_markers(mut self, group: &GroupId, markers: &[&str]) -> Self {
        self.store = self
            .store
            .with_member(group, &TestFixtures::person(), TestFixtures::markers(markers));
        self
    }

    pub fn with_store<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(InMemoryMembershipStore) -> InMemoryMembershipStore,
    {
        self.store = setup(self.store);
        self
    }

    pub fn with_sink(mut self, sink: RecordingSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> TestSwitcher {
        Switcher::new(
            Arc::new(TestFixtures::directory()),
            self.store,
            StaticCatalog::from_fixtures(),
            self.sink,
        )
    }
}

impl Default for SwitcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
