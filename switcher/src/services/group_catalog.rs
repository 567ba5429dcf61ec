//! Guild and role names, fetched once per guild and cached for the life of
//! the process

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use shared::{GroupId, MarkerId};
use tokio::sync::{OnceCell, RwLock};
use tracing::warn;

use crate::error::SwitcherResult;
use crate::services::discord_client::DiscordClient;
use crate::traits::GroupCatalog;

#[derive(Deserialize)]
struct Guild {
    name: String,
}

#[derive(Deserialize)]
struct Role {
    id: MarkerId,
    name: String,
}

/// Per-group cache slot; concurrent misses share one fetch
type Slot<T> = Arc<OnceCell<T>>;

/// Group catalog backed by the guild and role endpoints
#[derive(Clone)]
pub struct RealGroupCatalog {
    client: Arc<DiscordClient>,
    group_names: Arc<RwLock<HashMap<GroupId, Slot<Option<String>>>>>,
    marker_names: Arc<RwLock<HashMap<GroupId, Slot<Option<HashMap<MarkerId, String>>>>>>,
}

impl RealGroupCatalog {
    pub fn new(client: Arc<DiscordClient>) -> Self {
        Self {
            client,
            group_names: Arc::new(RwLock::new(HashMap::new())),
            marker_names: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn slot<T>(cache: &RwLock<HashMap<GroupId, Slot<T>>>, group: &GroupId) -> Slot<T> {
        if let Some(slot) = cache.read().await.get(group) {
            return slot.clone();
        }
        cache.write().await.entry(group.clone()).or_default().clone()
    }

    async fn fetch_group_name(&self, group: &GroupId) -> SwitcherResult<Option<String>> {
        let guild: Option<Guild> = self.client.get_json(&format!("/guilds/{group}")).await?;
        Ok(guild.map(|guild| guild.name))
    }

    async fn fetch_roles(&self, group: &GroupId) -> SwitcherResult<Option<HashMap<MarkerId, String>>> {
        let roles: Option<Vec<Role>> = self.client.get_json(&format!("/guilds/{group}/roles")).await?;
        Ok(roles.map(|roles| roles.into_iter().map(|role| (role.id, role.name)).collect()))
    }
}

// Failed fetches leave the slot empty so a later call retries.
#[async_trait]
impl GroupCatalog for RealGroupCatalog {
    async fn group_name(&self, group: &GroupId) -> Option<String> {
        let slot = Self::slot(&self.group_names, group).await;
        match slot.get_or_try_init(|| self.fetch_group_name(group)).await {
            Ok(name) => name.clone(),
            Err(e) => {
                warn!("⚠️ Could not load guild {}: {}", group, e);
                None
            }
        }
    }

    async fn marker_name(&self, group: &GroupId, marker: &MarkerId) -> Option<String> {
        let slot = Self::slot(&self.marker_names, group).await;
        match slot.get_or_try_init(|| self.fetch_roles(group)).await {
            Ok(roles) => roles.as_ref()?.get(marker).cloned(),
            Err(e) => {
                warn!("⚠️ Could not load roles of {}: {}", group, e);
                None
            }
        }
    }
}
