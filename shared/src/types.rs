//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declares an opaque, string-backed platform identifier.
///
/// Platform ids are snowflakes, but nothing here does arithmetic on them,
/// so they are kept as the exact text the platform hands out.
macro_rules! platform_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

platform_id! {
    /// A person whose on-leave status is being tracked
    PersonId
}

platform_id! {
    /// An independently administered group (a guild)
    GroupId
}

platform_id! {
    /// A federation of groups sharing one audit sink
    OrganizationId
}

platform_id! {
    /// A togglable attribute on a member (a role)
    MarkerId
}

platform_id! {
    /// A text channel that receives audit records or panels
    ChannelId
}

/// Correlation id for one toggle request, attached to every log line it emits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One on/off-leave axis within a group: two mutually intended markers
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPair {
    pub off_leave: MarkerId,
    pub on_leave: MarkerId,
}

impl CategoryPair {
    pub fn new(off_leave: impl Into<String>, on_leave: impl Into<String>) -> Self {
        Self {
            off_leave: MarkerId::new(off_leave),
            on_leave: MarkerId::new(on_leave),
        }
    }

    /// The marker a member should end up with for the given direction
    pub fn desired(&self, going_on_leave: bool) -> &MarkerId {
        if going_on_leave {
            &self.on_leave
        } else {
            &self.off_leave
        }
    }

    /// The marker a member should lose for the given direction
    pub fn undesired(&self, going_on_leave: bool) -> &MarkerId {
        if going_on_leave {
            &self.off_leave
        } else {
            &self.on_leave
        }
    }
}
