//! Reactions to host lifecycle events.
//!
//! The host fires these after a page is deleted or cloned, and after a field
//! is removed from a fieldgroup. Each reaction keeps the lock table free of
//! rows that point at things which no longer exist.

use pagelock_core::field_ref::FieldKey;
use pagelock_core::types::DbId;

use crate::lock_store::LockStore;

/// A page was deleted: drop all of its locks.
pub async fn on_page_deleted(store: &mut LockStore, page_id: DbId) -> u64 {
    let removed = store.remove_all_locks_for_page(page_id).await;
    tracing::info!(page_id, removed, "Removed locks of deleted page");
    removed
}

/// A page was cloned: the copy gets the same lock set as the source.
///
/// Lock flags are not carried over; copied locks start at zero.
pub async fn on_page_cloned(store: &mut LockStore, source_id: DbId, copy_id: DbId) -> u64 {
    let locks = store.get_locks(source_id).await;
    if locks.is_empty() {
        return 0;
    }
    let added = store.add_locks(copy_id, locks.into_keys()).await;
    tracing::info!(source_id, copy_id, added, "Copied locks to cloned page");
    added
}

/// A field was removed from a fieldgroup: drop its locks on pages whose
/// template uses that fieldgroup.
pub async fn on_field_removed(
    store: &mut LockStore,
    fieldgroup_id: DbId,
    field: impl Into<FieldKey>,
) -> u64 {
    let field = field.into();
    let removed = store
        .remove_all_locks_for_field_in_fieldgroup(field.clone(), fieldgroup_id)
        .await;
    tracing::info!(fieldgroup_id, field = %field, removed, "Removed locks of field dropped from fieldgroup");
    removed
}
