//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod page_lock_repo;

pub use page_lock_repo::PageLockRepo;
