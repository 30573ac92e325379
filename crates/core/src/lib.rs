//! Domain logic for per-page field locking.
//!
//! Nothing in this crate performs I/O. Storage lives in `pagelock-db`, and
//! the host CMS is reached through the traits in [`host`].

pub mod editor;
pub mod error;
pub mod field_ref;
pub mod host;
pub mod inputfield_lock;
pub mod page_actions;
pub mod permissions;
pub mod roles;
pub mod settings;
pub mod types;
