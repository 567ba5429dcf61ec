//! Switcher data types

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use shared::{CategoryPair, GroupId, MarkerId, OrganizationId, PersonId, RequestId};

/// Maximum length of the free-text reason and duration fields
pub const MAX_NOTE_LEN: usize = 1024;

/// Longest label the platform accepts on a button
pub const MAX_BUTTON_LABEL_LEN: usize = 80;

/// A person's marker state in one category of one group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberClassification {
    Neither,
    OffLeaveOnly,
    OnLeaveOnly,
    /// Both markers present
    Conflicting,
}

impl MemberClassification {
    pub fn from_markers(pair: &CategoryPair, markers: &BTreeSet<MarkerId>) -> Self {
        match (markers.contains(&pair.off_leave), markers.contains(&pair.on_leave)) {
            (true, true) => MemberClassification::Conflicting,
            (true, false) => MemberClassification::OffLeaveOnly,
            (false, true) => MemberClassification::OnLeaveOnly,
            (false, false) => MemberClassification::Neither,
        }
    }

    /// Whether this category carries evidence of being on leave
    pub fn shows_on_leave(self) -> bool {
        matches!(
            self,
            MemberClassification::OnLeaveOnly | MemberClassification::Conflicting
        )
    }

    /// Whether this category carries evidence of being on duty
    pub fn shows_off_leave(self) -> bool {
        matches!(
            self,
            MemberClassification::OffLeaveOnly | MemberClassification::Conflicting
        )
    }

    /// Whether the marker wanted for the given direction is present
    pub fn has_desired(self, going_on_leave: bool) -> bool {
        if going_on_leave {
            self.shows_on_leave()
        } else {
            self.shows_off_leave()
        }
    }

    /// Whether the marker to be removed for the given direction is present
    pub fn has_undesired(self, going_on_leave: bool) -> bool {
        self.has_desired(!going_on_leave)
    }
}

impl fmt::Display for MemberClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MemberClassification::Neither => "neither",
            MemberClassification::OffLeaveOnly => "off-leave",
            MemberClassification::OnLeaveOnly => "on-leave",
            MemberClassification::Conflicting => "conflicting",
        };
        f.write_str(label)
    }
}

/// Classification of one category inside a group snapshot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryState {
    pub pair: CategoryPair,
    pub classification: MemberClassification,
}

/// One consistent read of a person's membership in a group
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSnapshot {
    pub group: GroupId,
    pub group_name: String,
    /// Every marker the person holds in the group, tracked or not
    pub markers: BTreeSet<MarkerId>,
    pub categories: Vec<CategoryState>,
}

impl GroupSnapshot {
    pub fn new(
        group: GroupId,
        group_name: String,
        markers: BTreeSet<MarkerId>,
        pairs: &[CategoryPair],
    ) -> Self {
        let categories = pairs
            .iter()
            .map(|pair| CategoryState {
                pair: pair.clone(),
                classification: MemberClassification::from_markers(pair, &markers),
            })
            .collect();

        Self {
            group,
            group_name,
            markers,
            categories,
        }
    }

    /// Whether any tracked category holds at least one marker
    pub fn is_touched(&self) -> bool {
        self.categories
            .iter()
            .any(|state| state.classification != MemberClassification::Neither)
    }
}

/// Per-group classifications for one person across one organization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classifications {
    pub person: PersonId,
    pub organization: OrganizationId,
    /// Groups the person is a member of, in directory order
    pub groups: Vec<GroupSnapshot>,
}

impl Classifications {
    /// Every classification in stable group/category order
    pub fn iter(&self) -> impl Iterator<Item = MemberClassification> + '_ {
        self.groups
            .iter()
            .flat_map(|snapshot| snapshot.categories.iter().map(|state| state.classification))
    }
}

/// Resulting state a toggle moves the person into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetState {
    OnLeave,
    OffLeave,
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetState::OnLeave => f.write_str("on-leave"),
            TargetState::OffLeave => f.write_str("off-leave"),
        }
    }
}

/// Organization-wide outcome of one toggle request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub going_on_leave: bool,
    pub had_conflict: bool,
}

impl Decision {
    pub fn target_state(&self) -> TargetState {
        if self.going_on_leave {
            TargetState::OnLeave
        } else {
            TargetState::OffLeave
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Keep,
    Switch,
    Merge,
}

/// One computed change (or confirmed no-change) in one category
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRecord {
    pub group: GroupId,
    pub group_name: String,
    pub kind: ActionKind,
    /// `[desired]` for keep, `[undesired, desired]` for switch and merge
    pub markers: Vec<MarkerId>,
}

/// Result of writing one group's desired marker set
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// Desired set equalled the current set, nothing was written
    Unchanged,
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupApplyResult {
    pub group: GroupId,
    pub group_name: String,
    pub outcome: ApplyOutcome,
}

impl GroupApplyResult {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ApplyOutcome::Failed { .. })
    }
}

/// A single toggle request from a person in their group of origin
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleRequest {
    pub person: PersonId,
    pub origin_group: GroupId,
    pub reason: Option<String>,
    pub duration: Option<String>,
}

impl ToggleRequest {
    pub fn new(person: PersonId, origin_group: GroupId) -> Self {
        Self {
            person,
            origin_group,
            reason: None,
            duration: None,
        }
    }

    /// Attach a reason; blank text counts as no reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = non_blank(reason.into());
        self
    }

    /// Attach a duration; blank text counts as no duration
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = non_blank(duration.into());
        self
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Everything a finished toggle produced
#[derive(Clone, Debug)]
pub struct ToggleOutcome {
    pub request_id: RequestId,
    pub decision: Decision,
    pub actions: Vec<ActionRecord>,
    pub apply_results: Vec<GroupApplyResult>,
}

impl ToggleOutcome {
    /// Final status message for the requester
    pub fn message(&self) -> String {
        let mut message = format!("You are now {}.", self.decision.target_state());
        if self.decision.had_conflict {
            message.push_str(
                " You had conflicting roles, so I set you to off-leave by default. \
                 If you want to go on-leave, press the button again.",
            );
        }
        message
    }

    /// One notice per group whose write failed
    pub fn failure_notices(&self) -> Vec<String> {
        self.apply_results
            .iter()
            .filter(|result| result.is_failed())
            .map(|result| format!("Failed to adjust your roles in {}!", result.group_name))
            .collect()
    }
}

/// Dry-run view of what a toggle would do
#[derive(Clone, Debug)]
pub struct StatusPreview {
    pub classifications: Classifications,
    /// `None` when the person holds no tracked marker anywhere
    pub decision: Option<Decision>,
    pub actions: Vec<ActionRecord>,
}

/// One rendered action line of an audit record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditAction {
    pub kind: ActionKind,
    pub group_name: String,
    pub marker_refs: Vec<String>,
}

impl AuditAction {
    pub fn describe(&self) -> String {
        let first = self.marker_refs.first().map(String::as_str).unwrap_or("");
        let second = self.marker_refs.get(1).map(String::as_str).unwrap_or("");
        match self.kind {
            ActionKind::Keep => format!("Kept {} in {}", first, self.group_name),
            ActionKind::Switch => {
                format!("Switched {} `->` {} in {}", first, second, self.group_name)
            }
            ActionKind::Merge => format!(
                "User had both {} and {}, merged so they only have {} in {}",
                first, second, second, self.group_name
            ),
        }
    }
}

/// Structured summary of one toggle, delivered to the audit sink
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub person: PersonId,
    pub target_state: TargetState,
    pub reason: Option<String>,
    pub duration: Option<String>,
    pub conflict: bool,
    pub actions: Vec<AuditAction>,
}

/// Messages the audit sink accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditMessage {
    Toggle(AuditRecord),
    ApplyFailed { person: PersonId, group_name: String },
}

/// One group's section of the switcher panel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelField {
    pub name: String,
    pub value: String,
}

/// Description of every tracked category pair in an organization
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    pub description: String,
    pub fields: Vec<PanelField>,
    /// Label of the button that starts a toggle
    pub button_label: String,
}
