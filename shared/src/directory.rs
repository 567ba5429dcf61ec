//! Static organization directory
//!
//! Maps groups to their organization and back, and lists the on/off-leave
//! category pairs tracked in each group. The directory is built once from a
//! JSON document at startup and is read-only afterwards.
//!
//! ```json
//! {
//!   "organizations": [
//!     {
//!       "id": "org",
//!       "audit_channel": "123",
//!       "audit_group": "456",
//!       "groups": [
//!         { "id": "456", "categories": [ { "off_leave": "1", "on_leave": "2" } ] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::{CategoryPair, ChannelId, GroupId, OrganizationId};

/// On-disk shape of the directory
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DirectoryConfig {
    pub organizations: Vec<OrganizationConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrganizationConfig {
    pub id: OrganizationId,
    /// Channel that receives audit records for this organization
    #[serde(default)]
    pub audit_channel: Option<ChannelId>,
    /// Group hosting the audit channel; markers of this group render as mentions
    #[serde(default)]
    pub audit_group: Option<GroupId>,
    pub groups: Vec<GroupConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GroupConfig {
    pub id: GroupId,
    #[serde(default)]
    pub categories: Vec<CategoryPair>,
}

/// Where an organization's audit records go
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditTarget {
    pub channel: Option<ChannelId>,
    pub home_group: Option<GroupId>,
}

/// Immutable group/organization/category lookup
#[derive(Clone, Debug, Default)]
pub struct Directory {
    group_to_org: HashMap<GroupId, OrganizationId>,
    org_to_groups: HashMap<OrganizationId, Vec<GroupId>>,
    categories: HashMap<GroupId, Vec<CategoryPair>>,
    audit_targets: HashMap<OrganizationId, AuditTarget>,
}

impl Directory {
    /// Build and validate a directory from its configuration
    pub fn from_config(config: DirectoryConfig) -> SharedResult<Self> {
        let mut directory = Directory::default();

        for org in config.organizations {
            if directory.org_to_groups.contains_key(&org.id) {
                return Err(SharedError::invalid_config("organizations.id", &org.id));
            }
            if org.groups.is_empty() {
                return Err(SharedError::invalid_config(
                    format!("organizations[{}].groups", org.id),
                    "[]",
                ));
            }

            let mut group_ids = Vec::with_capacity(org.groups.len());
            for group in org.groups {
                if directory.group_to_org.contains_key(&group.id) {
                    return Err(SharedError::invalid_config("groups.id", &group.id));
                }
                validate_categories(&group)?;

                directory.group_to_org.insert(group.id.clone(), org.id.clone());
                directory.categories.insert(group.id.clone(), group.categories);
                group_ids.push(group.id);
            }

            if let Some(home) = org.audit_group.as_ref() {
                if !group_ids.contains(home) {
                    return Err(SharedError::invalid_config(
                        format!("organizations[{}].audit_group", org.id),
                        home,
                    ));
                }
            }

            directory.audit_targets.insert(
                org.id.clone(),
                AuditTarget {
                    channel: org.audit_channel,
                    home_group: org.audit_group,
                },
            );
            directory.org_to_groups.insert(org.id, group_ids);
        }

        Ok(directory)
    }

    /// Parse a directory from JSON text
    pub fn from_json_str(json: &str) -> SharedResult<Self> {
        let config: DirectoryConfig =
            serde_json::from_str(json).map_err(|e| SharedError::DeserializationError {
                message: e.to_string(),
            })?;
        Self::from_config(config)
    }

    /// Load a directory from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SharedResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SharedError::ConfigUnreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    pub fn organization_of(&self, group: &GroupId) -> Option<&OrganizationId> {
        self.group_to_org.get(group)
    }

    /// Groups of an organization in discovery order
    pub fn groups_of(&self, organization: &OrganizationId) -> &[GroupId] {
        self.org_to_groups
            .get(organization)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Category pairs of a group in configured order
    pub fn categories_of(&self, group: &GroupId) -> &[CategoryPair] {
        self.categories
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn audit_target(&self, organization: &OrganizationId) -> AuditTarget {
        self.audit_targets
            .get(organization)
            .cloned()
            .unwrap_or_default()
    }

    pub fn organization_count(&self) -> usize {
        self.org_to_groups.len()
    }
}

fn validate_categories(group: &GroupConfig) -> SharedResult<()> {
    let mut seen = HashSet::new();
    for (index, pair) in group.categories.iter().enumerate() {
        let field = format!("groups[{}].categories[{}]", group.id, index);
        if pair.off_leave == pair.on_leave {
            return Err(SharedError::invalid_config(field, &pair.off_leave));
        }
        for marker in [&pair.off_leave, &pair.on_leave] {
            if !seen.insert(marker.clone()) {
                return Err(SharedError::invalid_config(field, marker));
            }
        }
    }
    Ok(())
}
