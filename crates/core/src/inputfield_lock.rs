//! Decorating editor form controls as locked.
//!
//! The host builds the page editor form; for every control that corresponds
//! to a locked field or property the host asks this module how the control
//! should look and behave. Locking only changes presentation and input
//! processing of the control, never the stored value.

use serde::{Deserialize, Serialize};

use crate::field_ref::{FieldRef, PageLocks};
use crate::settings::{LockSettings, Toggle};

/// Note shown inside locked controls when the `locknote` toggle is on.
pub const LOCKED_LABEL: &str = "This field is locked and may not be modified.";

/// Form control name used for the page name property.
pub const PAGE_NAME_INPUT: &str = "_pw_page_name";

pub const CLASS_LOCKED: &str = "InputfieldIsLocked";
pub const CLASS_LOCKED_AT_START: &str = "InputfieldIsLockedAtStart";
pub const CLASS_LOCKED_BUT_RENDERED: &str = "InputfieldIsLockedButRendered";

const LOCK_ICON: &str = "<i class='fa fa-fw fa-lock'></i>";

/// Collapsed/visibility state of a form control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collapsed {
    #[default]
    No,
    Yes,
    Blank,
    Hidden,
    Populated,
    YesAjax,
    BlankAjax,
    YesLocked,
    NoLocked,
    BlankLocked,
}

impl Collapsed {
    /// The locked counterpart of this state.
    pub fn locked(self) -> Self {
        match self {
            Self::Yes | Self::YesAjax | Self::YesLocked => Self::YesLocked,
            Self::Blank | Self::BlankLocked => Self::BlankLocked,
            _ => Self::NoLocked,
        }
    }
}

/// The parts of a form control this module may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputfieldState {
    /// Input name, e.g. `"title"` or `"_pw_page_name"`.
    pub name: String,
    /// DOM id, used to match ajax render requests.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub collapsed: Collapsed,
    #[serde(default)]
    pub wrap_classes: Vec<String>,
    #[serde(default)]
    pub prepend_markup: String,
    /// When set the host must not process submitted input for this control.
    #[serde(default)]
    pub skip_processing: bool,
    /// When set the host renders the value instead of the input.
    #[serde(default)]
    pub render_value_mode: bool,
}

impl InputfieldState {
    fn add_class(&mut self, class: &str) {
        if !self.wrap_classes.iter().any(|c| c == class) {
            self.wrap_classes.push(class.to_string());
        }
    }

    pub fn is_locked(&self) -> bool {
        self.wrap_classes.iter().any(|c| c == CLASS_LOCKED)
    }
}

/// Request facts that affect how a control is locked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LockContext {
    /// The form is being submitted rather than displayed.
    #[serde(default)]
    pub is_post: bool,
    /// DOM id of the control currently being rendered over ajax, if any.
    #[serde(default)]
    pub ajax_render_target: Option<String>,
}

/// Name of the form control that edits the given field or property.
pub fn form_field_name(field_name: &str) -> &str {
    if field_name == "name" {
        PAGE_NAME_INPUT
    } else {
        field_name
    }
}

/// Apply the locked presentation to one control.
pub fn lock_inputfield(
    f: &mut InputfieldState,
    target: FieldRef,
    settings: &LockSettings,
    ctx: &LockContext,
) {
    // Live inputs are only kept on display, never while processing a submit.
    let render_inputs = !ctx.is_post && settings.renders_inputs_for(target.storage_id());
    if render_inputs {
        f.add_class(CLASS_LOCKED_BUT_RENDERED);
    }

    if f.collapsed == Collapsed::YesAjax {
        lock_ajax_inputfield(f, render_inputs, ctx);
    } else if settings.has_toggle(Toggle::Minimize) {
        f.collapsed = if render_inputs {
            Collapsed::Yes
        } else {
            Collapsed::YesLocked
        };
    } else if !render_inputs {
        f.collapsed = f.collapsed.locked();
    }

    f.add_class(CLASS_LOCKED);
    f.add_class(CLASS_LOCKED_AT_START);

    if settings.has_toggle(Toggle::Locknote) {
        f.prepend_markup.push_str(&format!(
            "<p class='pwlf-locknote'><span class='notes'>{LOCK_ICON} {LOCKED_LABEL}</span></p>"
        ));
    }
}

/// There is no combined "locked + ajax" collapsed state, so an ajax control
/// keeps its state, is excluded from input processing, and renders its value
/// when it is the ajax target.
fn lock_ajax_inputfield(f: &mut InputfieldState, render_inputs: bool, ctx: &LockContext) {
    if !render_inputs && ctx.ajax_render_target.as_deref() == Some(f.id.as_str()) {
        f.render_value_mode = true;
    }
    f.skip_processing = true;
}

/// Lock every control of `form` that edits a locked field or property.
///
/// Returns the names of the controls that were locked.
pub fn lock_form(
    form: &mut [InputfieldState],
    locks: &PageLocks,
    settings: &LockSettings,
    ctx: &LockContext,
) -> Vec<String> {
    let mut locked = Vec::new();
    for (target, field_name) in locks {
        if field_name.is_empty() {
            continue;
        }
        let input_name = form_field_name(field_name);
        if let Some(f) = form.iter_mut().find(|f| f.name == input_name) {
            lock_inputfield(f, *target, settings, ctx);
            locked.push(f.name.clone());
        }
    }
    locked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_ref::PageProperty;

    fn control(name: &str, collapsed: Collapsed) -> InputfieldState {
        InputfieldState {
            name: name.to_string(),
            id: format!("Inputfield_{name}"),
            collapsed,
            ..InputfieldState::default()
        }
    }

    fn no_toggles() -> LockSettings {
        LockSettings {
            toggles: Default::default(),
            ..LockSettings::default()
        }
    }

    #[test]
    fn collapsed_states_map_to_locked() {
        assert_eq!(Collapsed::Yes.locked(), Collapsed::YesLocked);
        assert_eq!(Collapsed::YesAjax.locked(), Collapsed::YesLocked);
        assert_eq!(Collapsed::No.locked(), Collapsed::NoLocked);
        assert_eq!(Collapsed::Blank.locked(), Collapsed::BlankLocked);
        assert_eq!(Collapsed::BlankLocked.locked(), Collapsed::BlankLocked);
        assert_eq!(Collapsed::Hidden.locked(), Collapsed::NoLocked);
    }

    #[test]
    fn plain_lock_adds_classes_and_state() {
        let mut f = control("title", Collapsed::No);
        lock_inputfield(&mut f, FieldRef::Field(1), &no_toggles(), &LockContext::default());
        assert_eq!(f.collapsed, Collapsed::NoLocked);
        assert!(f.is_locked());
        assert!(f.wrap_classes.iter().any(|c| c == CLASS_LOCKED_AT_START));
        assert!(f.prepend_markup.is_empty());
        assert!(!f.skip_processing);
    }

    #[test]
    fn locknote_prepends_note() {
        let mut f = control("title", Collapsed::No);
        lock_inputfield(&mut f, FieldRef::Field(1), &LockSettings::default(), &LockContext::default());
        assert!(f.prepend_markup.contains(LOCKED_LABEL));
        assert!(f.prepend_markup.contains("pwlf-locknote"));
    }

    #[test]
    fn minimize_collapses() {
        let mut settings = no_toggles();
        settings.toggles.insert(Toggle::Minimize);
        let mut f = control("title", Collapsed::No);
        lock_inputfield(&mut f, FieldRef::Field(1), &settings, &LockContext::default());
        assert_eq!(f.collapsed, Collapsed::YesLocked);
    }

    #[test]
    fn render_inputs_keeps_state_on_display_only() {
        let settings = LockSettings {
            render_inputs_for: vec![1],
            ..no_toggles()
        };

        let mut shown = control("title", Collapsed::No);
        lock_inputfield(&mut shown, FieldRef::Field(1), &settings, &LockContext::default());
        assert_eq!(shown.collapsed, Collapsed::No);
        assert!(shown.wrap_classes.iter().any(|c| c == CLASS_LOCKED_BUT_RENDERED));

        let post = LockContext {
            is_post: true,
            ..LockContext::default()
        };
        let mut submitted = control("title", Collapsed::No);
        lock_inputfield(&mut submitted, FieldRef::Field(1), &settings, &post);
        assert_eq!(submitted.collapsed, Collapsed::NoLocked);
        assert!(!submitted.wrap_classes.iter().any(|c| c == CLASS_LOCKED_BUT_RENDERED));
    }

    #[test]
    fn render_inputs_with_minimize_uses_plain_collapse() {
        let mut settings = LockSettings {
            render_inputs_for: vec![-4],
            ..no_toggles()
        };
        settings.toggles.insert(Toggle::Minimize);
        let mut f = control("status", Collapsed::No);
        lock_inputfield(&mut f, PageProperty::Status.into(), &settings, &LockContext::default());
        assert_eq!(f.collapsed, Collapsed::Yes);
    }

    #[test]
    fn ajax_controls_skip_processing() {
        let mut f = control("images", Collapsed::YesAjax);
        lock_inputfield(&mut f, FieldRef::Field(9), &no_toggles(), &LockContext::default());
        assert_eq!(f.collapsed, Collapsed::YesAjax);
        assert!(f.skip_processing);
        assert!(!f.render_value_mode);

        let ctx = LockContext {
            ajax_render_target: Some("Inputfield_images".into()),
            ..LockContext::default()
        };
        let mut target = control("images", Collapsed::YesAjax);
        lock_inputfield(&mut target, FieldRef::Field(9), &no_toggles(), &ctx);
        assert!(target.render_value_mode);
    }

    #[test]
    fn lock_form_matches_by_input_name() {
        let mut form = vec![
            control(PAGE_NAME_INPUT, Collapsed::No),
            control("title", Collapsed::No),
            control("body", Collapsed::No),
        ];
        let locks: PageLocks = [
            (FieldRef::Property(PageProperty::Name), "name".to_string()),
            (FieldRef::Field(1), "title".to_string()),
            (FieldRef::Field(99), String::new()),
        ]
        .into_iter()
        .collect();

        let locked = lock_form(&mut form, &locks, &no_toggles(), &LockContext::default());
        assert_eq!(locked, vec![PAGE_NAME_INPUT.to_string(), "title".to_string()]);
        assert!(form[0].is_locked());
        assert!(form[1].is_locked());
        assert!(!form[2].is_locked());
    }

    #[test]
    fn locking_twice_does_not_duplicate_classes() {
        let mut f = control("title", Collapsed::No);
        let settings = no_toggles();
        lock_inputfield(&mut f, FieldRef::Field(1), &settings, &LockContext::default());
        lock_inputfield(&mut f, FieldRef::Field(1), &settings, &LockContext::default());
        assert_eq!(f.wrap_classes.len(), 2);
        assert_eq!(f.collapsed, Collapsed::NoLocked);
    }
}
