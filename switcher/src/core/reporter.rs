//! Audit reporter
//!
//! Renders reconciliation results for humans and hands them to the audit
//! sink. Delivery is fire-and-forget: failures are logged and dropped.

use futures_util::future::join_all;
use shared::{
    request_debug, request_warn, AuditTarget, Directory, GroupId, MarkerId, OrganizationId,
    PersonId, RequestId,
};

use crate::traits::{AuditSink, GroupCatalog};
use crate::types::{
    ActionRecord, AuditAction, AuditMessage, AuditRecord, Decision, Panel, PanelField,
};

const UNKNOWN_MARKER: &str = "[unknown role]";

pub const PANEL_TITLE: &str = "Switch On-Leave Status";
pub const PANEL_DESCRIPTION: &str =
    "Click below to go on or off leave. Feel free to leave the reason and/or duration blank.";
pub const DEFAULT_BUTTON_LABEL: &str = "Press this pretty button to switch your on-leave status";

/// Mention syntax for a marker referenced inside its own group
pub fn marker_mention(marker: &MarkerId) -> String {
    format!("<@&{marker}>")
}

/// Mention syntax for a person
pub fn person_mention(person: &PersonId) -> String {
    format!("<@{person}>")
}

pub struct AuditReporter<'a, C, S>
where
    C: GroupCatalog,
    S: AuditSink,
{
    catalog: &'a C,
    sink: &'a S,
}

impl<'a, C, S> AuditReporter<'a, C, S>
where
    C: GroupCatalog,
    S: AuditSink,
{
    pub fn new(catalog: &'a C, sink: &'a S) -> Self {
        Self { catalog, sink }
    }

    /// Render a marker as seen from `home`: a mention when it lives there,
    /// otherwise `@name`
    pub async fn marker_ref(&self, home: Option<&GroupId>, group: &GroupId, marker: &MarkerId) -> String {
        if home == Some(group) {
            return marker_mention(marker);
        }
        let name = self
            .catalog
            .marker_name(group, marker)
            .await
            .unwrap_or_else(|| UNKNOWN_MARKER.to_string());
        format!("@{name}")
    }

    /// Build the structured record for one toggle
    pub async fn build_record(
        &self,
        target: &AuditTarget,
        person: &PersonId,
        decision: &Decision,
        actions: &[ActionRecord],
        reason: Option<&str>,
        duration: Option<&str>,
    ) -> AuditRecord {
        let home = target.home_group.as_ref();
        let rendered = join_all(actions.iter().map(|action| async move {
            let refs = join_all(
                action
                    .markers
                    .iter()
                    .map(|marker| self.marker_ref(home, &action.group, marker)),
            )
            .await;
            AuditAction {
                kind: action.kind,
                group_name: action.group_name.clone(),
                marker_refs: refs,
            }
        }))
        .await;

        AuditRecord {
            person: person.clone(),
            target_state: decision.target_state(),
            reason: reason.map(str::to_string),
            duration: duration.map(str::to_string),
            conflict: decision.had_conflict,
            actions: rendered,
        }
    }

    /// Deliver the toggle record; never fails
    #[allow(clippy::too_many_arguments)]
    pub async fn report(
        &self,
        request_id: RequestId,
        target: &AuditTarget,
        person: &PersonId,
        decision: &Decision,
        actions: &[ActionRecord],
        reason: Option<&str>,
        duration: Option<&str>,
    ) {
        let record = self
            .build_record(target, person, decision, actions, reason, duration)
            .await;
        self.send(request_id, target, AuditMessage::Toggle(record)).await;
    }

    /// Record that a group's write did not take effect; never fails
    pub async fn report_failure(
        &self,
        request_id: RequestId,
        target: &AuditTarget,
        person: &PersonId,
        group_name: &str,
    ) {
        let message = AuditMessage::ApplyFailed {
            person: person.clone(),
            group_name: group_name.to_string(),
        };
        self.send(request_id, target, message).await;
    }

    async fn send(&self, request_id: RequestId, target: &AuditTarget, message: AuditMessage) {
        let Some(channel) = target.channel.as_ref() else {
            request_debug!(request_id, "📭 No audit channel configured, dropping record");
            return;
        };
        if let Err(e) = self.sink.deliver(channel, message).await {
            request_warn!(request_id, "⚠️ Audit delivery to {} failed: {}", channel, e);
        }
    }

    /// Describe every tracked category pair of the organization as seen
    /// from the group of origin
    pub async fn render_panel(
        &self,
        directory: &Directory,
        organization: &OrganizationId,
        origin: &GroupId,
        button_label: Option<&str>,
    ) -> Panel {
        let fields = join_all(directory.groups_of(organization).iter().map(|group| async move {
            let name = self
                .catalog
                .group_name(group)
                .await
                .unwrap_or_else(|| group.to_string());

            let mut lines = Vec::new();
            for pair in directory.categories_of(group) {
                let off = self.marker_ref(Some(origin), group, &pair.off_leave).await;
                let on = self.marker_ref(Some(origin), group, &pair.on_leave).await;
                lines.push(format!("{off} `<->` {on}"));
            }

            PanelField {
                name,
                value: lines.join("\n"),
            }
        }))
        .await;

        Panel {
            title: PANEL_TITLE.to_string(),
            description: PANEL_DESCRIPTION.to_string(),
            fields,
            button_label: button_label.unwrap_or(DEFAULT_BUTTON_LABEL).to_string(),
        }
    }
}
