//! Channel messages as the audit sink

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::ChannelId;

use crate::core::reporter::person_mention;
use crate::error::SwitcherResult;
use crate::services::discord_client::DiscordClient;
use crate::traits::AuditSink;
use crate::types::{AuditMessage, AuditRecord, Panel, TargetState};

pub const COLOR_ON_LEAVE: u32 = 0xED4245;
pub const COLOR_OFF_LEAVE: u32 = 0x57F287;
pub const COLOR_PANEL: u32 = 0x2B2D31;

/// Blank field value that still renders
const EMPTY_VALUE: &str = "_ _";

/// Custom id of the panel button, matched by the interaction handler
pub const SWITCH_BUTTON_ID: &str = "switch-leave-status";

const COMPONENT_ACTION_ROW: u8 = 1;
const COMPONENT_BUTTON: u8 = 2;
const BUTTON_STYLE_SECONDARY: u8 = 2;

fn note_field(name: &str, missing: &str, value: Option<&str>) -> Value {
    match value {
        Some(value) => json!({ "name": name, "value": value }),
        None => json!({ "name": missing, "value": EMPTY_VALUE }),
    }
}

/// Embed summarising one toggle
pub fn toggle_embed(record: &AuditRecord) -> Value {
    let color = match record.target_state {
        TargetState::OnLeave => COLOR_ON_LEAVE,
        TargetState::OffLeave => COLOR_OFF_LEAVE,
    };
    let actions = if record.actions.is_empty() {
        EMPTY_VALUE.to_string()
    } else {
        record
            .actions
            .iter()
            .map(|action| action.describe())
            .collect::<Vec<_>>()
            .join("\n")
    };

    json!({
        "title": "On-Leave Status Switched",
        "description": format!(
            "{} has switched their on-leave status to {}.",
            person_mention(&record.person),
            record.target_state
        ),
        "color": color,
        "fields": [
            note_field("Reason", "(No Reason Provided)", record.reason.as_deref()),
            note_field("Duration", "(No Duration Provided)", record.duration.as_deref()),
            { "name": "Actions", "value": actions },
        ],
    })
}

/// Message body for any audit message
pub fn audit_payload(message: &AuditMessage) -> Value {
    let body = match message {
        AuditMessage::Toggle(record) => json!({ "embeds": [toggle_embed(record)] }),
        AuditMessage::ApplyFailed { person, group_name } => json!({
            "content": format!(
                "Failed to adjust roles for {} in {}!",
                person_mention(person),
                group_name
            ),
        }),
    };
    with_no_pings(body)
}

/// Message body for the switcher panel, with its single switch button
pub fn panel_payload(panel: &Panel) -> Value {
    let fields: Vec<Value> = panel
        .fields
        .iter()
        .map(|field| json!({ "name": field.name, "value": field.value }))
        .collect();

    with_no_pings(json!({
        "embeds": [{
            "title": panel.title,
            "description": panel.description,
            "color": COLOR_PANEL,
            "fields": fields,
        }],
        "components": [{
            "type": COMPONENT_ACTION_ROW,
            "components": [{
                "type": COMPONENT_BUTTON,
                "style": BUTTON_STYLE_SECONDARY,
                "custom_id": SWITCH_BUTTON_ID,
                "emoji": { "name": "🔄" },
                "label": panel.button_label,
            }],
        }],
    }))
}

/// Mentions render but never notify anyone
fn with_no_pings(mut body: Value) -> Value {
    body["allowed_mentions"] = json!({ "parse": [] });
    body
}

/// Audit sink posting to channels
#[derive(Clone)]
pub struct RealAuditSink {
    client: Arc<DiscordClient>,
}

impl RealAuditSink {
    pub fn new(client: Arc<DiscordClient>) -> Self {
        Self { client }
    }

    fn messages_path(channel: &ChannelId) -> String {
        format!("/channels/{channel}/messages")
    }
}

#[async_trait]
impl AuditSink for RealAuditSink {
    async fn deliver(&self, channel: &ChannelId, message: AuditMessage) -> SwitcherResult<()> {
        self.client
            .post_json(&Self::messages_path(channel), &audit_payload(&message))
            .await
    }

    async fn post_panel(&self, channel: &ChannelId, panel: Panel) -> SwitcherResult<()> {
        self.client
            .post_json(&Self::messages_path(channel), &panel_payload(&panel))
            .await
    }
}
