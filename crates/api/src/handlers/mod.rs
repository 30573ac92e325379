//! Request handlers.
//!
//! Each handler builds its own [`LockStore`](pagelock_db::lock_store::LockStore)
//! through [`AppState::lock_store`](crate::state::AppState::lock_store), so lock
//! caching never outlives a request.

pub mod editor;
pub mod lifecycle;
pub mod locks;
