//! Guild member roles as the membership store

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use shared::{GroupId, MarkerId, PersonId};

use crate::error::SwitcherResult;
use crate::services::discord_client::DiscordClient;
use crate::traits::MembershipStore;

#[derive(Deserialize)]
struct GuildMember {
    #[serde(default)]
    roles: Vec<MarkerId>,
}

/// Membership store backed by the guild member endpoints
#[derive(Clone)]
pub struct RealMembershipStore {
    client: Arc<DiscordClient>,
}

impl RealMembershipStore {
    pub fn new(client: Arc<DiscordClient>) -> Self {
        Self { client }
    }

    fn member_path(person: &PersonId, group: &GroupId) -> String {
        format!("/guilds/{group}/members/{person}")
    }
}

#[async_trait]
impl MembershipStore for RealMembershipStore {
    async fn current_markers(
        &self,
        person: &PersonId,
        group: &GroupId,
    ) -> SwitcherResult<Option<BTreeSet<MarkerId>>> {
        let member: Option<GuildMember> = self
            .client
            .get_json(&Self::member_path(person, group))
            .await?;
        Ok(member.map(|member| member.roles.into_iter().collect()))
    }

    async fn set_markers(
        &self,
        person: &PersonId,
        group: &GroupId,
        markers: &BTreeSet<MarkerId>,
    ) -> SwitcherResult<()> {
        let body = json!({ "roles": markers });
        self.client
            .patch_json(&Self::member_path(person, group), &body)
            .await
    }
}
