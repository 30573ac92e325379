//! Page editor support: the lock settings panel, the client script
//! configuration, and rejection of edits to locked fields.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::field_ref::{PageLocks, PageProperty};
use crate::host::FieldInfo;
use crate::inputfield_lock::{form_field_name, LOCKED_LABEL};
use crate::settings::{LockSettings, Toggle};
use crate::types::DbId;

/// Type column shown for built-in page properties.
const PROPERTY_KIND: &str = "Property";

/// One row of the "Locked fields" checkbox table on the Settings tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockOption {
    pub name: String,
    pub label: String,
    pub kind: String,
    pub checked: bool,
}

/// Build the lock settings rows for a page: the five properties, then the
/// page's own fields sorted by name. Fieldsets are not lockable.
pub fn lock_options(page_fields: &[FieldInfo], locks: &PageLocks) -> Vec<LockOption> {
    let locked: BTreeSet<&str> = locks.values().map(String::as_str).collect();

    let mut options: Vec<LockOption> = PageProperty::ALL
        .iter()
        .map(|p| LockOption {
            name: p.as_str().to_string(),
            label: p.label().to_string(),
            kind: PROPERTY_KIND.to_string(),
            checked: locked.contains(p.as_str()),
        })
        .collect();

    let mut fields: Vec<LockOption> = page_fields
        .iter()
        .filter(|f| !f.is_fieldset())
        .map(|f| LockOption {
            name: f.name.clone(),
            label: f.label.clone(),
            kind: f.type_name.clone(),
            checked: locked.contains(f.name.as_str()),
        })
        .collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));

    options.extend(fields);
    options
}

/// Configuration consumed by the editor's client-side lock script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorScriptConfig {
    pub use_longclick: bool,
    pub use_lockalert: bool,
    pub use_minimize: bool,
    /// Open the lock settings directly (the editor was reached from the lock report).
    pub jump_to_locks: bool,
    pub render_inputs_for: Vec<DbId>,
    pub lock_label: &'static str,
    pub locked_label: &'static str,
    pub unlock_label: &'static str,
    pub not_lockable_label: &'static str,
    pub lock_desc: &'static str,
    pub unlock_desc: &'static str,
}

impl EditorScriptConfig {
    pub fn new(settings: &LockSettings, jump_to_locks: bool) -> Self {
        Self {
            use_longclick: settings.has_toggle(Toggle::Longclick),
            use_lockalert: settings.has_toggle(Toggle::Lockalert),
            use_minimize: settings.has_toggle(Toggle::Minimize),
            jump_to_locks,
            render_inputs_for: settings.render_inputs_for.clone(),
            lock_label: "Lock this field?",
            locked_label: LOCKED_LABEL,
            unlock_label: "Unlock this field?",
            not_lockable_label: "This field not lockable.",
            lock_desc: "This field will become locked after you save.",
            unlock_desc: "This field will be unlocked after you save.",
        }
    }
}

/// Outcome of checking submitted input names against a page's locks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditReview {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
}

impl EditReview {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Split submitted form input names into those that may be saved and those
/// that target a locked field or property.
pub fn review_edits<I, S>(submitted: I, locks: &PageLocks) -> EditReview
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let locked_inputs: BTreeSet<&str> = locks
        .values()
        .filter(|name| !name.is_empty())
        .map(|name| form_field_name(name))
        .collect();

    let mut review = EditReview::default();
    for name in submitted {
        let name = name.into();
        if locked_inputs.contains(name.as_str()) {
            review.rejected.push(name);
        } else {
            review.accepted.push(name);
        }
    }
    review
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_ref::FieldRef;
    use crate::inputfield_lock::PAGE_NAME_INPUT;

    fn field(id: DbId, name: &str, type_name: &str) -> FieldInfo {
        FieldInfo {
            id,
            name: name.to_string(),
            label: name.to_uppercase(),
            type_name: type_name.to_string(),
        }
    }

    fn locks() -> PageLocks {
        [
            (FieldRef::Property(PageProperty::Name), "name".to_string()),
            (FieldRef::Field(2), "body".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn options_list_properties_then_sorted_fields() {
        let fields = vec![
            field(2, "body", "Textarea"),
            field(5, "tab", "FieldsetTabOpen"),
            field(1, "title", "PageTitle"),
            field(3, "address", "Text"),
        ];
        let options = lock_options(&fields, &locks());
        let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "template",
                "parent_id",
                "status",
                "delete_page",
                "address",
                "body",
                "title"
            ]
        );
        assert!(options[0].checked);
        assert_eq!(options[0].kind, "Property");
        assert!(options.iter().find(|o| o.name == "body").unwrap().checked);
        assert!(!options.iter().find(|o| o.name == "title").unwrap().checked);
    }

    #[test]
    fn script_config_reflects_toggles() {
        let config = EditorScriptConfig::new(&LockSettings::default(), true);
        assert!(config.use_longclick);
        assert!(!config.use_lockalert);
        assert!(!config.use_minimize);
        assert!(config.jump_to_locks);
        assert_eq!(config.locked_label, LOCKED_LABEL);
    }

    #[test]
    fn review_rejects_locked_inputs() {
        let review = review_edits([PAGE_NAME_INPUT, "title", "body"], &locks());
        assert_eq!(review.accepted, vec!["title".to_string()]);
        assert_eq!(
            review.rejected,
            vec![PAGE_NAME_INPUT.to_string(), "body".to_string()]
        );
        assert!(!review.is_clean());
    }

    #[test]
    fn review_without_locks_is_clean() {
        let review = review_edits(["title"], &PageLocks::new());
        assert!(review.is_clean());
    }
}
