//! Who may lock and unlock fields.

use crate::roles::{PERMISSION_PAGE_LOCK, ROLE_ADMIN};
use crate::settings::LockSettings;
use crate::types::DbId;

/// The identity of the user performing a lock operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
    pub permissions: Vec<String>,
}

impl Actor {
    /// Admins hold every permission.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.role == ROLE_ADMIN || self.permissions.iter().any(|p| p == permission)
    }
}

/// Whether `actor` may change the locks of a page.
///
/// A non-empty allow-list is authoritative; otherwise the `page-lock`
/// permission decides.
pub fn can_lock(settings: &LockSettings, actor: &Actor) -> bool {
    if settings.lock_users.is_empty() {
        actor.has_permission(PERMISSION_PAGE_LOCK)
    } else {
        settings.lock_users.contains(&actor.user_id)
    }
}
