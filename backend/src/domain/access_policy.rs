//! Role-based authorization guard.
//!
//! The guard is a pure predicate over a member's role set. It never touches
//! the store and holds no mutable state, so one instance is shared by every
//! service.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{MemberId, RoleId};

/// An already-authenticated group member and the roles they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Chat-platform member id.
    pub id: MemberId,
    /// Role ids the host resolved for the member.
    pub roles: BTreeSet<RoleId>,
}

impl Member {
    /// Build a member from an id and any role iterator.
    pub fn new(id: MemberId, roles: impl IntoIterator<Item = RoleId>) -> Self {
        Self {
            id,
            roles: roles.into_iter().collect(),
        }
    }
}

/// Raised when a comma-separated role list contains a non-integer entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role id '{entry}' in role list")]
pub struct RoleListError {
    /// The offending entry, trimmed.
    pub entry: String,
}

/// Parse `"1, 2,3"` into a role set; empty entries are ignored.
pub fn parse_role_list(raw: &str) -> Result<BTreeSet<RoleId>, RoleListError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            RoleId::from_str(entry).map_err(|_| RoleListError {
                entry: entry.to_owned(),
            })
        })
        .collect()
}

/// Configured allow-list plus the role that may never receive work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    allowed_roles: BTreeSet<RoleId>,
    blocked_receiver: Option<RoleId>,
}

impl AccessPolicy {
    /// Build a policy; with no allow-listed roles nobody may assign work.
    pub fn new(
        allowed_roles: impl IntoIterator<Item = RoleId>,
        blocked_receiver: Option<RoleId>,
    ) -> Self {
        Self {
            allowed_roles: allowed_roles.into_iter().collect(),
            blocked_receiver,
        }
    }

    /// True when the caller holds at least one allow-listed role.
    ///
    /// An empty allow-list authorizes nobody.
    pub fn is_authorized(&self, roles: &BTreeSet<RoleId>) -> bool {
        !self.allowed_roles.is_disjoint(roles)
    }

    /// True unless the member holds the blocked receiver role.
    pub fn can_receive(&self, roles: &BTreeSet<RoleId>) -> bool {
        self.blocked_receiver
            .is_none_or(|blocked| !roles.contains(&blocked))
    }
}
