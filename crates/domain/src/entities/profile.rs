//! Profile - the client-local identity of the signed-in user

use serde::{Deserialize, Serialize};

use crate::{PermissionSet, UserId};

/// The authenticated identity the whole client reads.
///
/// This is the one value persisted across reloads. It is owned by the
/// session store; everything else receives it by handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl Profile {
    pub fn new(id: UserId, permissions: PermissionSet) -> Self {
        Self { id, permissions }
    }
}
