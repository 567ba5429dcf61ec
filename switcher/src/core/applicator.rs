//! Role/marker applicator

use futures_util::future::join_all;
use shared::{request_debug, request_warn, PersonId, RequestId};

use crate::core::reconciler::desired_markers;
use crate::traits::MembershipStore;
use crate::types::{ApplyOutcome, Classifications, Decision, GroupApplyResult, GroupSnapshot};

/// Writes each group's desired marker set, one replacement call per group
pub struct Applicator<'a, M: MembershipStore> {
    membership: &'a M,
}

impl<'a, M: MembershipStore> Applicator<'a, M> {
    pub fn new(membership: &'a M) -> Self {
        Self { membership }
    }

    /// Apply the decision to every touched group
    ///
    /// Groups are written concurrently and independently. A failed write is
    /// returned as a `Failed` result and never stops the other groups.
    pub async fn apply_all(
        &self,
        request_id: RequestId,
        classifications: &Classifications,
        decision: &Decision,
    ) -> Vec<GroupApplyResult> {
        let writes = classifications
            .groups
            .iter()
            .filter(|snapshot| snapshot.is_touched())
            .map(|snapshot| self.apply_group(request_id, &classifications.person, snapshot, decision));

        join_all(writes).await
    }

    async fn apply_group(
        &self,
        request_id: RequestId,
        person: &PersonId,
        snapshot: &GroupSnapshot,
        decision: &Decision,
    ) -> GroupApplyResult {
        let desired = desired_markers(snapshot, decision);

        let outcome = if desired == snapshot.markers {
            request_debug!(request_id, "⏭️ Markers in {} already match", snapshot.group);
            ApplyOutcome::Unchanged
        } else {
            match self.membership.set_markers(person, &snapshot.group, &desired).await {
                Ok(()) => {
                    request_debug!(request_id, "✅ Updated markers in {}", snapshot.group);
                    ApplyOutcome::Applied
                }
                Err(e) => {
                    request_warn!(
                        request_id,
                        "⚠️ Failed to update markers for {} in {}: {}",
                        person,
                        snapshot.group,
                        e
                    );
                    ApplyOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        };

        GroupApplyResult {
            group: snapshot.group.clone(),
            group_name: snapshot.group_name.clone(),
            outcome,
        }
    }
}
