//! Member state reader
//!
//! Reads the person's membership in every group of an organization, once
//! per group, and classifies each tracked category against that snapshot.

use futures_util::future::join_all;
use shared::{request_debug, request_warn, Directory, GroupId, OrganizationId, PersonId, RequestId};

use crate::traits::{GroupCatalog, MembershipStore};
use crate::types::{Classifications, GroupSnapshot};

pub struct MemberStateReader<'a, M, C>
where
    M: MembershipStore,
    C: GroupCatalog,
{
    directory: &'a Directory,
    membership: &'a M,
    catalog: &'a C,
}

impl<'a, M, C> MemberStateReader<'a, M, C>
where
    M: MembershipStore,
    C: GroupCatalog,
{
    pub fn new(directory: &'a Directory, membership: &'a M, catalog: &'a C) -> Self {
        Self {
            directory,
            membership,
            catalog,
        }
    }

    /// Classify the person across every group of the organization
    ///
    /// Groups are read concurrently; the result keeps directory order.
    /// Groups the person is not in, or that cannot be read, are left out.
    pub async fn classify(
        &self,
        request_id: RequestId,
        person: &PersonId,
        organization: &OrganizationId,
    ) -> Classifications {
        let reads = self
            .directory
            .groups_of(organization)
            .iter()
            .map(|group| self.read_group(request_id, person, group));

        let groups = join_all(reads).await.into_iter().flatten().collect();

        Classifications {
            person: person.clone(),
            organization: organization.clone(),
            groups,
        }
    }

    async fn read_group(
        &self,
        request_id: RequestId,
        person: &PersonId,
        group: &GroupId,
    ) -> Option<GroupSnapshot> {
        let markers = match self.membership.current_markers(person, group).await {
            Ok(Some(markers)) => markers,
            Ok(None) => {
                request_debug!(request_id, "👤 {} is not a member of {}", person, group);
                return None;
            }
            Err(e) => {
                request_warn!(request_id, "⚠️ Could not read {} in {}, skipping: {}", person, group, e);
                return None;
            }
        };

        let group_name = self
            .catalog
            .group_name(group)
            .await
            .unwrap_or_else(|| group.to_string());

        Some(GroupSnapshot::new(
            group.clone(),
            group_name,
            markers,
            self.directory.categories_of(group),
        ))
    }
}
