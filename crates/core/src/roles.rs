//! Well-known role and permission name constants.
//!
//! These must match the names the host CMS embeds in issued access tokens.

/// Role that implies every permission.
pub const ROLE_ADMIN: &str = "admin";

/// Permission required to lock or unlock fields when no allow-list is configured.
pub const PERMISSION_PAGE_LOCK: &str = "page-lock";
