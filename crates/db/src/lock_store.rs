//! The lock relation store.
//!
//! [`LockStore`] answers "which fields and properties are locked on which
//! pages", translates between names and ids, and memoizes per-page reads.
//! A store is meant to live for one request: construct it, use it, drop it.
//!
//! The store is the error boundary of the lock module. Storage and host
//! failures are logged and resolve to an empty mapping, `false` or `0`; no
//! error is returned to callers.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use pagelock_core::field_ref::{self, FieldKey, FieldRef, PageLocks};
use pagelock_core::host::{LockHost, PageDirectory};
use pagelock_core::types::{DbId, LockFlags};
use sqlx::PgPool;

use crate::models::page_lock::{LockedField, PageLockSummary};
use crate::repositories::PageLockRepo;

/// Lock flags of one page, by target.
type FlagMap = HashMap<FieldRef, LockFlags>;

pub struct LockStore {
    pool: PgPool,
    host: Arc<dyn LockHost>,
    /// page id -> locked targets and their names
    names: HashMap<DbId, PageLocks>,
    /// page id -> locked targets and their flags
    flags: HashMap<DbId, FlagMap>,
}

impl LockStore {
    pub fn new(pool: PgPool, host: Arc<dyn LockHost>) -> Self {
        Self {
            pool,
            host,
            names: HashMap::new(),
            flags: HashMap::new(),
        }
    }

    pub fn host(&self) -> &Arc<dyn LockHost> {
        &self.host
    }

    // -----------------------------------------------------------------------
    // Identifier translation
    // -----------------------------------------------------------------------

    /// Translate a field/property reference into a storable target.
    ///
    /// `None` means no such field or property.
    pub async fn field_id(&self, field: impl Into<FieldKey>) -> Option<FieldRef> {
        let key = field.into();
        match field_ref::resolve_field(&key, self.host.as_ref()).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::error!(error = %e, field = %key, "Failed to resolve field reference");
                None
            }
        }
    }

    /// Name of a target: the property name, the field name, or empty if the
    /// field no longer exists.
    pub async fn field_name(&self, target: FieldRef) -> String {
        match field_ref::field_name(target, self.host.as_ref()).await {
            Ok(name) => name,
            Err(e) => {
                tracing::error!(error = %e, field_id = target.storage_id(), "Failed to resolve field name");
                String::new()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Cache
    // -----------------------------------------------------------------------

    /// Forget the cached locks of one page.
    pub fn invalidate(&mut self, page_id: DbId) {
        self.names.remove(&page_id);
        self.flags.remove(&page_id);
    }

    /// Forget every cached page.
    pub fn invalidate_all(&mut self) {
        self.names.clear();
        self.flags.clear();
    }

    /// Ensure a page's locks are cached and return them. `None` when the page
    /// id is invalid or storage failed; failed reads are not cached.
    async fn load(&mut self, page_id: DbId) -> Option<&PageLocks> {
        if page_id <= 0 {
            return None;
        }
        if !self.names.contains_key(&page_id) {
            let (locks, flags) = self.fetch(page_id).await?;
            self.names.insert(page_id, locks);
            self.flags.insert(page_id, flags);
        }
        self.names.get(&page_id)
    }

    async fn fetch(&self, page_id: DbId) -> Option<(PageLocks, FlagMap)> {
        let rows = match PageLockRepo::list_for_page(&self.pool, page_id).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, page_id, "Failed to load page locks");
                return None;
            }
        };

        let mut locks = PageLocks::new();
        let mut flags = FlagMap::new();
        for row in rows {
            let Some(target) = FieldRef::from_storage_id(row.fields_id) else {
                tracing::warn!(page_id, field_id = row.fields_id, "Ignoring lock with unknown property id");
                continue;
            };
            let name = self.field_name(target).await;
            locks.insert(target, name);
            flags.insert(target, row.flags);
        }
        Some((locks, flags))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All locks of a page. Empty for unknown pages.
    pub async fn get_locks(&mut self, page_id: DbId) -> PageLocks {
        self.load(page_id).await.cloned().unwrap_or_default()
    }

    /// Every page that has locks, ordered by page id, with display paths.
    /// Not cached.
    pub async fn get_all_locks(&self) -> Vec<PageLockSummary> {
        let rows = match PageLockRepo::list_all(&self.pool).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load lock inventory");
                return Vec::new();
            }
        };

        let mut summaries: Vec<PageLockSummary> = Vec::new();
        for row in rows {
            let Some(target) = FieldRef::from_storage_id(row.fields_id) else {
                continue;
            };
            if summaries.last().map(|s| s.page_id) != Some(row.pages_id) {
                let path = match self.host.page_path(row.pages_id).await {
                    Ok(path) => path.unwrap_or_default(),
                    Err(e) => {
                        tracing::error!(error = %e, page_id = row.pages_id, "Failed to resolve page path");
                        String::new()
                    }
                };
                summaries.push(PageLockSummary {
                    page_id: row.pages_id,
                    path,
                    fields: Vec::new(),
                });
            }
            let field_name = self.field_name(target).await;
            if let Some(summary) = summaries.last_mut() {
                summary.fields.push(LockedField {
                    field_id: row.fields_id,
                    field_name,
                });
            }
        }
        summaries
    }

    pub async fn is_locked(&mut self, page_id: DbId, field: impl Into<FieldKey>) -> bool {
        let Some(target) = self.field_id(field).await else {
            return false;
        };
        self.load(page_id)
            .await
            .is_some_and(|locks| locks.contains_key(&target))
    }

    /// Flags of a lock; `0` when the lock does not exist.
    pub async fn get_lock_flags(&mut self, page_id: DbId, field: impl Into<FieldKey>) -> LockFlags {
        let Some(target) = self.field_id(field).await else {
            return 0;
        };
        if self.load(page_id).await.is_none() {
            return 0;
        }
        self.flags
            .get(&page_id)
            .and_then(|flags| flags.get(&target))
            .copied()
            .unwrap_or(0)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Lock one field. Returns `false` if it was already locked, could not be
    /// resolved, or storage failed.
    pub async fn add_lock(&mut self, page_id: DbId, field: impl Into<FieldKey>, flags: LockFlags) -> bool {
        let Some(target) = self.field_id(field).await else {
            return false;
        };
        if page_id <= 0 {
            return false;
        }
        let field_id = target.storage_id();
        let inserted = match PageLockRepo::insert(&self.pool, page_id, field_id, flags).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::debug!(page_id, field_id, "Lock already exists");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, page_id, field_id, "Failed to add lock");
                false
            }
        };
        self.invalidate(page_id);
        inserted
    }

    /// Lock many fields of one page (flags are zero). Unresolvable and
    /// duplicate references are skipped. Returns how many locks are new.
    pub async fn add_locks<I, K>(&mut self, page_id: DbId, fields: I) -> u64
    where
        I: IntoIterator<Item = K>,
        K: Into<FieldKey>,
    {
        if page_id <= 0 {
            return 0;
        }
        let field_ids = self.resolve_all(fields).await;
        let count = match PageLockRepo::insert_many(&self.pool, page_id, &field_ids).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(error = %e, page_id, "Failed to add locks");
                0
            }
        };
        self.invalidate(page_id);
        count
    }

    /// Make the page's lock set exactly `fields`.
    ///
    /// Nothing is written when the resolved set equals the current one.
    /// Returns `true` when the lock set changed.
    pub async fn replace_locks<I, K>(&mut self, page_id: DbId, fields: I) -> bool
    where
        I: IntoIterator<Item = K>,
        K: Into<FieldKey>,
    {
        if page_id <= 0 {
            return false;
        }
        let wanted = self.resolve_all(fields).await;
        let Some(current) = self.load(page_id).await else {
            return false;
        };
        let current: Vec<DbId> = current.keys().map(|r| r.storage_id()).collect();
        if current == wanted {
            return false;
        }

        let changed = match PageLockRepo::replace_for_page(&self.pool, page_id, &wanted).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(error = %e, page_id, "Failed to replace locks");
                false
            }
        };
        self.invalidate(page_id);
        changed
    }

    /// Unlock one field. Returns `true` if a lock was removed.
    pub async fn remove_lock(&mut self, page_id: DbId, field: impl Into<FieldKey>) -> bool {
        let Some(target) = self.field_id(field).await else {
            return false;
        };
        let field_id = target.storage_id();
        let removed = match PageLockRepo::delete(&self.pool, page_id, field_id).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::error!(error = %e, page_id, field_id, "Failed to remove lock");
                false
            }
        };
        self.invalidate(page_id);
        removed
    }

    pub async fn remove_all_locks_for_page(&mut self, page_id: DbId) -> u64 {
        let count = match PageLockRepo::delete_for_page(&self.pool, page_id).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(error = %e, page_id, "Failed to remove page locks");
                0
            }
        };
        self.invalidate(page_id);
        count
    }

    /// Remove a field's locks on every page. Clears the whole cache since
    /// the affected pages are unknown.
    pub async fn remove_all_locks_for_field(&mut self, field: impl Into<FieldKey>) -> u64 {
        let Some(target) = self.field_id(field).await else {
            return 0;
        };
        let field_id = target.storage_id();
        let count = match PageLockRepo::delete_for_field(&self.pool, field_id).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(error = %e, field_id, "Failed to remove field locks");
                0
            }
        };
        self.invalidate_all();
        count
    }

    /// Remove a field's locks, but only on pages whose template uses the
    /// given fieldgroup. Pages of other templates that reuse the same field
    /// keep their locks.
    pub async fn remove_all_locks_for_field_in_fieldgroup(
        &mut self,
        field: impl Into<FieldKey>,
        fieldgroup_id: DbId,
    ) -> u64 {
        // Properties are not fieldgroup members.
        let Some(FieldRef::Field(field_id)) = self.field_id(field).await else {
            return 0;
        };

        let templates: HashSet<DbId> = match self.host.fieldgroup_templates(fieldgroup_id).await {
            Ok(templates) => templates.into_iter().collect(),
            Err(e) => {
                tracing::error!(error = %e, fieldgroup_id, "Failed to resolve fieldgroup templates");
                return 0;
            }
        };
        if templates.is_empty() {
            return 0;
        }

        let locked_pages = match PageLockRepo::list_pages_for_field(&self.pool, field_id).await {
            Ok(pages) => pages,
            Err(e) => {
                tracing::error!(error = %e, field_id, "Failed to list pages locking field");
                return 0;
            }
        };

        let mut affected = Vec::new();
        for page_id in locked_pages {
            match self.host.page_template(page_id).await {
                Ok(Some(template_id)) if templates.contains(&template_id) => affected.push(page_id),
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, page_id, "Failed to resolve page template");
                }
            }
        }

        let count =
            match PageLockRepo::delete_for_field_on_pages(&self.pool, field_id, &affected).await {
                Ok(count) => count,
                Err(e) => {
                    tracing::error!(error = %e, field_id, fieldgroup_id, "Failed to remove fieldgroup locks");
                    0
                }
            };
        self.invalidate_all();
        count
    }

    /// Resolve references into sorted, de-duplicated storage ids, dropping
    /// the ones that do not resolve.
    async fn resolve_all<I, K>(&self, fields: I) -> Vec<DbId>
    where
        I: IntoIterator<Item = K>,
        K: Into<FieldKey>,
    {
        let keys: Vec<FieldKey> = fields.into_iter().map(Into::into).collect();
        let mut ids = BTreeSet::new();
        for key in keys {
            match self.field_id(key.clone()).await {
                Some(target) => {
                    ids.insert(target.storage_id());
                }
                None => tracing::debug!(field = %key, "Skipping unknown field reference"),
            }
        }
        ids.into_iter().collect()
    }
}
