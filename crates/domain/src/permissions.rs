//! Permission vocabulary attached to user accounts.
//!
//! Permissions gate which parts of the application a user can see and
//! which administrative calls they may issue. The server stores them as
//! independent flags; holding one says nothing about the others.

use serde::{Deserialize, Serialize};

/// A single permission flag a user can hold.
///
/// The wire format serializes these as the variant name inside a
/// `{"type": ...}` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PermissionKind {
    SuperUser,
    Approved,
    GuildLeaderEligible,
    Rejected,
}

impl PermissionKind {
    pub const ALL: [PermissionKind; 4] = [
        PermissionKind::SuperUser,
        PermissionKind::Approved,
        PermissionKind::GuildLeaderEligible,
        PermissionKind::Rejected,
    ];
}

/// The set of permissions held by one user.
///
/// Duplicates are collapsed on construction; the server enforces no
/// uniqueness constraint, so payloads may repeat a kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    kinds: Vec<PermissionKind>,
}

impl PermissionSet {
    pub fn new(kinds: impl IntoIterator<Item = PermissionKind>) -> Self {
        let mut set = Self { kinds: Vec::new() };
        for kind in kinds {
            set.grant(kind);
        }
        set
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: PermissionKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Add a kind if not already present.
    pub fn grant(&mut self, kind: PermissionKind) {
        if !self.contains(kind) {
            self.kinds.push(kind);
        }
    }

    /// Remove a kind if present.
    pub fn revoke(&mut self, kind: PermissionKind) {
        self.kinds.retain(|k| *k != kind);
    }

    pub fn is_approved(&self) -> bool {
        self.contains(PermissionKind::Approved)
    }

    pub fn is_super_user(&self) -> bool {
        self.contains(PermissionKind::SuperUser)
    }

    pub fn is_guild_leader_eligible(&self) -> bool {
        self.contains(PermissionKind::GuildLeaderEligible)
    }

    pub fn is_rejected(&self) -> bool {
        self.contains(PermissionKind::Rejected)
    }

    pub fn iter(&self) -> impl Iterator<Item = PermissionKind> + '_ {
        self.kinds.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl FromIterator<PermissionKind> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PermissionKind>>(iter: I) -> Self {
        Self::new(iter)
    }
}
