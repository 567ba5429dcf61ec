//! Switcher implementation with dependency injection

use std::sync::Arc;

use shared::{
    request_info, request_warn, ChannelId, Directory, GroupId, OrganizationId, PersonId, RequestId,
};

use crate::core::{compute_actions, decide, decide_from, Applicator, AuditReporter, MemberStateReader};
use crate::error::{SwitcherError, SwitcherResult};
use crate::traits::{AuditSink, GroupCatalog, MembershipStore};
use crate::types::{StatusPreview, ToggleOutcome, ToggleRequest, MAX_BUTTON_LABEL_LEN, MAX_NOTE_LEN};

/// On-leave switcher with dependency injection
pub struct Switcher<M, C, S>
where
    M: MembershipStore,
    C: GroupCatalog,
    S: AuditSink,
{
    pub directory: Arc<Directory>,
    pub membership: M,
    pub catalog: C,
    pub sink: S,
}

impl<M, C, S> Switcher<M, C, S>
where
    M: MembershipStore,
    C: GroupCatalog,
    S: AuditSink,
{
    /// Create new switcher instance
    pub fn new(directory: Arc<Directory>, membership: M, catalog: C, sink: S) -> Self {
        Self {
            directory,
            membership,
            catalog,
            sink,
        }
    }

    fn organization_for(&self, group: &GroupId) -> SwitcherResult<OrganizationId> {
        self.directory
            .organization_of(group)
            .cloned()
            .ok_or_else(|| SwitcherError::UnconfiguredGroup {
                group: group.clone(),
            })
    }

    /// Run one toggle request to completion across every group
    ///
    /// The decision is taken once from a single read of each group and is
    /// not revisited while writing. Per-group write failures end up in the
    /// outcome; the toggle itself still succeeds.
    pub async fn toggle(&self, request: ToggleRequest) -> SwitcherResult<ToggleOutcome> {
        validate_note("reason", request.reason.as_deref())?;
        validate_note("duration", request.duration.as_deref())?;
        let organization = self.organization_for(&request.origin_group)?;

        let request_id = RequestId::new();
        request_info!(
            request_id,
            "🔄 Toggle requested by {} from {} ({})",
            request.person,
            request.origin_group,
            organization
        );

        let reader = MemberStateReader::new(&self.directory, &self.membership, &self.catalog);
        let classifications = reader.classify(request_id, &request.person, &organization).await;

        let decision = match decide(&classifications) {
            Ok(decision) => decision,
            Err(e) => {
                request_info!(request_id, "🚫 Nothing to switch for {}", request.person);
                return Err(e);
            }
        };
        let actions = compute_actions(&classifications, &decision);
        request_info!(
            request_id,
            "📋 Moving {} to {} with {} action(s), conflict: {}",
            request.person,
            decision.target_state(),
            actions.len(),
            decision.had_conflict
        );

        let apply_results = Applicator::new(&self.membership)
            .apply_all(request_id, &classifications, &decision)
            .await;

        let target = self.directory.audit_target(&organization);
        let reporter = AuditReporter::new(&self.catalog, &self.sink);
        for failed in apply_results.iter().filter(|result| result.is_failed()) {
            request_warn!(request_id, "⚠️ Markers in {} were not updated", failed.group_name);
            reporter
                .report_failure(request_id, &target, &request.person, &failed.group_name)
                .await;
        }
        reporter
            .report(
                request_id,
                &target,
                &request.person,
                &decision,
                &actions,
                request.reason.as_deref(),
                request.duration.as_deref(),
            )
            .await;

        Ok(ToggleOutcome {
            request_id,
            decision,
            actions,
            apply_results,
        })
    }

    /// Show what a toggle would do without writing anything
    pub async fn preview(&self, person: &PersonId, origin_group: &GroupId) -> SwitcherResult<StatusPreview> {
        let organization = self.organization_for(origin_group)?;
        let reader = MemberStateReader::new(&self.directory, &self.membership, &self.catalog);
        let classifications = reader.classify(RequestId::new(), person, &organization).await;

        let decision = decide_from(classifications.iter());
        let actions = decision
            .map(|decision| compute_actions(&classifications, &decision))
            .unwrap_or_default();

        Ok(StatusPreview {
            classifications,
            decision,
            actions,
        })
    }

    /// Post the organization's switcher panel to a channel
    ///
    /// A blank `button_label` falls back to the default label.
    pub async fn post_panel(
        &self,
        origin_group: &GroupId,
        channel: &ChannelId,
        button_label: Option<&str>,
    ) -> SwitcherResult<()> {
        let button_label = button_label.filter(|label| !label.trim().is_empty());
        if let Some(label) = button_label {
            if label.chars().count() > MAX_BUTTON_LABEL_LEN {
                return Err(SwitcherError::InvalidInput {
                    field: "button-label".to_string(),
                    reason: format!("must be at most {MAX_BUTTON_LABEL_LEN} characters"),
                });
            }
        }

        let organization = self.organization_for(origin_group)?;
        let panel = AuditReporter::new(&self.catalog, &self.sink)
            .render_panel(&self.directory, &organization, origin_group, button_label)
            .await;
        self.sink.post_panel(channel, panel).await
    }
}

fn validate_note(field: &str, text: Option<&str>) -> SwitcherResult<()> {
    match text {
        Some(text) if text.chars().count() > MAX_NOTE_LEN => Err(SwitcherError::InvalidInput {
            field: field.to_string(),
            reason: format!("must be at most {MAX_NOTE_LEN} characters"),
        }),
        _ => Ok(()),
    }
}
