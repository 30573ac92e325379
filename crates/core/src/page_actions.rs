//! Gating of page-list actions, page moves and front-end edits by locks.

use serde::{Deserialize, Serialize};

/// Message returned when a status-changing action is refused.
pub const STATUS_LOCKED_MESSAGE: &str =
    "Action is disabled because this page\u{2019}s \u{201c}status\u{201d} field is locked.";

/// Page-list actions that change a page's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    Pub,
    Unpub,
    Hide,
    Unhide,
    Lock,
    Unlock,
    Trash,
    Restore,
}

impl StatusAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pub => "pub",
            Self::Unpub => "unpub",
            Self::Hide => "hide",
            Self::Unhide => "unhide",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
            Self::Trash => "trash",
            Self::Restore => "restore",
        }
    }

    /// `None` for actions that do not touch status (e.g. `move`, `edit`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pub" => Some(Self::Pub),
            "unpub" => Some(Self::Unpub),
            "hide" => Some(Self::Hide),
            "unhide" => Some(Self::Unhide),
            "lock" => Some(Self::Lock),
            "unlock" => Some(Self::Unlock),
            "trash" => Some(Self::Trash),
            "restore" => Some(Self::Restore),
            _ => None,
        }
    }
}

/// Response body the page list expects from an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    pub action: String,
    pub success: bool,
    pub message: String,
    pub update_item: i64,
    pub remove: bool,
    pub refresh_children: bool,
}

/// Decide whether a page-list action may run.
///
/// Returns the failure response that replaces the action, or `None` when it
/// should proceed.
pub fn gate_page_list_action(action: &str, status_locked: bool) -> Option<ActionResponse> {
    if !status_locked || StatusAction::parse(action).is_none() {
        return None;
    }
    Some(ActionResponse {
        action: action.to_string(),
        success: false,
        message: STATUS_LOCKED_MESSAGE.to_string(),
        update_item: 0,
        remove: false,
        refresh_children: false,
    })
}

/// A page can be moved unless its parent is locked.
pub fn is_moveable(parent_locked: bool) -> bool {
    !parent_locked
}

/// A field can be edited on the front end unless it is locked.
pub fn is_editable(field_locked: bool) -> bool {
    !field_locked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_actions_blocked_when_locked() {
        for action in ["pub", "unpub", "hide", "unhide", "lock", "unlock", "trash", "restore"] {
            let response = gate_page_list_action(action, true).expect("should be blocked");
            assert!(!response.success);
            assert_eq!(response.action, action);
            assert_eq!(response.update_item, 0);
            assert!(!response.remove);
        }
    }

    #[test]
    fn unlocked_pages_proceed() {
        assert_eq!(gate_page_list_action("unpub", false), None);
    }

    #[test]
    fn other_actions_proceed() {
        assert_eq!(gate_page_list_action("move", true), None);
        assert_eq!(gate_page_list_action("edit", true), None);
    }

    #[test]
    fn parse_round_trips() {
        for s in ["pub", "unpub", "hide", "unhide", "lock", "unlock", "trash", "restore"] {
            assert_eq!(StatusAction::parse(s).map(|a| a.as_str()), Some(s));
        }
    }

    #[test]
    fn move_and_edit_gates() {
        assert!(is_moveable(false));
        assert!(!is_moveable(true));
        assert!(is_editable(false));
        assert!(!is_editable(true));
    }
}
