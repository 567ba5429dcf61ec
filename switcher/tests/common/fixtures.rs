//! Test fixtures and data for switcher tests

use std::collections::BTreeSet;

use shared::{ChannelId, Directory, GroupId, MarkerId, PersonId};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const PERSON: &'static str = "1001";
    pub const GROUP_1: &'static str = "g1";
    pub const GROUP_2: &'static str = "g2";
    pub const UNCONFIGURED_GROUP: &'static str = "g-unknown";
    pub const AUDIT_CHANNEL: &'static str = "900";

    /// g1 tracks two categories, g2 tracks one; audit lives in g1
    pub const DIRECTORY_JSON: &'static str = r#"{
        "organizations": [
            {
                "id": "org",
                "audit_channel": "900",
                "audit_group": "g1",
                "groups": [
                    { "id": "g1", "categories": [
                        { "off_leave": "g1-duty", "on_leave": "g1-leave" },
                        { "off_leave": "g1-duty-b", "on_leave": "g1-leave-b" }
                    ] },
                    { "id": "g2", "categories": [
                        { "off_leave": "g2-duty", "on_leave": "g2-leave" }
                    ] }
                ]
            }
        ]
    }"#;

    pub fn directory() -> Directory {
        Directory::from_json_str(Self::DIRECTORY_JSON).unwrap()
    }

    pub fn person() -> PersonId {
        PersonId::new(Self::PERSON)
    }

    pub fn group_1() -> GroupId {
        GroupId::new(Self::GROUP_1)
    }

    pub fn group_2() -> GroupId {
        GroupId::new(Self::GROUP_2)
    }

    pub fn audit_channel() -> ChannelId {
        ChannelId::new(Self::AUDIT_CHANNEL)
    }

    pub fn markers(ids: &[&str]) -> BTreeSet<MarkerId> {
        ids.iter().map(|id| MarkerId::new(*id)).collect()
    }

    /// Display names known to the static catalog
    pub fn group_names() -> Vec<(&'static str, &'static str)> {
        vec![("g1", "Alpha"), ("g2", "Beta")]
    }

    pub fn marker_names() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("g1", "g1-duty", "Alpha Duty"),
            ("g1", "g1-leave", "Alpha Leave"),
            ("g2", "g2-duty", "Beta Duty"),
            ("g2", "g2-leave", "Beta Leave"),
        ]
    }
}
