//! Lock configuration: feature toggles, the lock allow-list, and the fields
//! that still render live inputs while locked.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

/// A named editor feature that can be switched on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    /// Long-click on a field header toggles its lock.
    Longclick,
    /// Show a note inside locked fields.
    Locknote,
    /// Pop up an alert when a locked field is clicked.
    Lockalert,
    /// Always collapse locked fields.
    Minimize,
}

impl Toggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Longclick => "longclick",
            Self::Locknote => "locknote",
            Self::Lockalert => "lockalert",
            Self::Minimize => "minimize",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "longclick" => Ok(Self::Longclick),
            "locknote" => Ok(Self::Locknote),
            "lockalert" => Ok(Self::Lockalert),
            "minimize" => Ok(Self::Minimize),
            _ => Err(CoreError::Validation(format!(
                "Invalid toggle: '{s}'. Must be one of: longclick, locknote, lockalert, minimize"
            ))),
        }
    }
}

impl std::fmt::Display for Toggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LockSettings
// ---------------------------------------------------------------------------

/// Module-wide lock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockSettings {
    pub toggles: BTreeSet<Toggle>,
    /// User ids allowed to lock/unlock. Empty means "anyone holding the
    /// `page-lock` permission".
    pub lock_users: Vec<DbId>,
    /// Storage ids (sentinels allowed) of fields that keep live inputs
    /// when locked.
    pub render_inputs_for: Vec<DbId>,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            toggles: [Toggle::Longclick, Toggle::Locknote].into_iter().collect(),
            lock_users: Vec::new(),
            render_inputs_for: Vec::new(),
        }
    }
}

impl LockSettings {
    pub fn has_toggle(&self, toggle: Toggle) -> bool {
        self.toggles.contains(&toggle)
    }

    pub fn renders_inputs_for(&self, field_id: DbId) -> bool {
        self.render_inputs_for.contains(&field_id)
    }

    /// Build settings from their textual forms (comma or whitespace separated).
    pub fn parse(toggles: &str, lock_users: &str, render_inputs_for: &str) -> Result<Self, CoreError> {
        Ok(Self {
            toggles: parse_toggles(toggles)?,
            lock_users: parse_id_list(lock_users)?,
            render_inputs_for: parse_id_list(render_inputs_for)?,
        })
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
}

/// Parse a toggle list such as `"longclick, locknote"`.
pub fn parse_toggles(s: &str) -> Result<BTreeSet<Toggle>, CoreError> {
    split_list(s).map(Toggle::from_str).collect()
}

/// Parse an id list such as `"41 42"` or `"-4,12"`.
pub fn parse_id_list(s: &str) -> Result<Vec<DbId>, CoreError> {
    split_list(s)
        .map(|part| {
            part.parse::<DbId>()
                .map_err(|_| CoreError::Validation(format!("Invalid id in list: '{part}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toggles() {
        let settings = LockSettings::default();
        assert!(settings.has_toggle(Toggle::Longclick));
        assert!(settings.has_toggle(Toggle::Locknote));
        assert!(!settings.has_toggle(Toggle::Minimize));
        assert!(settings.lock_users.is_empty());
    }

    #[test]
    fn parse_mixed_separators() {
        let settings = LockSettings::parse("minimize,lockalert", "41 42,43", "-4, 12").unwrap();
        assert_eq!(
            settings.toggles,
            [Toggle::Lockalert, Toggle::Minimize].into_iter().collect()
        );
        assert_eq!(settings.lock_users, vec![41, 42, 43]);
        assert!(settings.renders_inputs_for(-4));
        assert!(settings.renders_inputs_for(12));
    }

    #[test]
    fn empty_strings_give_empty_lists() {
        let settings = LockSettings::parse("", "  ", "").unwrap();
        assert!(settings.toggles.is_empty());
        assert!(settings.lock_users.is_empty());
        assert!(settings.render_inputs_for.is_empty());
    }

    #[test]
    fn unknown_toggle_is_rejected() {
        assert!(parse_toggles("locknote, sparkle").is_err());
    }

    #[test]
    fn bad_id_is_rejected() {
        assert!(parse_id_list("12 abc").is_err());
    }
}
