//! Row structs and DTOs.
//!
//! - [`page_lock`] -- rows of `page_edit_lock_fields` and lock report shapes
//! - [`host`] -- rows read from the host CMS tables

pub mod host;
pub mod page_lock;
