//! Field and page-property identifiers, and translation between names and ids.
//!
//! A lock targets a [`FieldRef`]: either a real field from the host field
//! registry or one of the five built-in [`PageProperty`] values. In storage a
//! property is encoded as a small negative sentinel, so it can never collide
//! with a real field id (those are always positive). Id `0` means "no such
//! field or property" and is never stored.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::host::FieldRegistry;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// PageProperty
// ---------------------------------------------------------------------------

/// A built-in page attribute that can be locked like a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageProperty {
    Name,
    Template,
    ParentId,
    Status,
    DeletePage,
}

impl PageProperty {
    /// Every property, in sentinel order (`-1` first).
    pub const ALL: [PageProperty; 5] = [
        Self::Name,
        Self::Template,
        Self::ParentId,
        Self::Status,
        Self::DeletePage,
    ];

    /// The negative id this property is stored under.
    pub fn sentinel_id(self) -> DbId {
        match self {
            Self::Name => -1,
            Self::Template => -2,
            Self::ParentId => -3,
            Self::Status => -4,
            Self::DeletePage => -5,
        }
    }

    pub fn from_sentinel_id(id: DbId) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.sentinel_id() == id)
    }

    /// Canonical property name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Template => "template",
            Self::ParentId => "parent_id",
            Self::Status => "status",
            Self::DeletePage => "delete_page",
        }
    }

    /// Parse a canonical name or one of the legacy alternate spellings
    /// (`templates_id`, `template_id`, `parent`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "template" | "templates_id" | "template_id" => Some(Self::Template),
            "parent_id" | "parent" => Some(Self::ParentId),
            "status" => Some(Self::Status),
            "delete_page" => Some(Self::DeletePage),
            _ => None,
        }
    }

    /// Human-readable label shown in the lock settings panel.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Page name",
            Self::Template => "Template",
            Self::ParentId => "Parent page",
            Self::Status => "Status",
            Self::DeletePage => "Delete/trash page",
        }
    }
}

impl fmt::Display for PageProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldRef
// ---------------------------------------------------------------------------

/// A resolved, storable lock target.
///
/// Ordering follows the storage id, so properties sort before fields the same
/// way rows come back from the table's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRef {
    /// A real field definition (id is always positive).
    Field(DbId),
    Property(PageProperty),
}

impl FieldRef {
    /// Build a field reference, rejecting non-positive ids.
    pub fn field(id: DbId) -> Option<Self> {
        (id > 0).then_some(Self::Field(id))
    }

    /// The id this reference is stored under.
    pub fn storage_id(self) -> DbId {
        match self {
            Self::Field(id) => id,
            Self::Property(p) => p.sentinel_id(),
        }
    }

    /// Decode a stored id. `0` and unknown negative ids yield `None`.
    pub fn from_storage_id(id: DbId) -> Option<Self> {
        if id > 0 {
            Some(Self::Field(id))
        } else {
            PageProperty::from_sentinel_id(id).map(Self::Property)
        }
    }

    pub fn as_property(self) -> Option<PageProperty> {
        match self {
            Self::Property(p) => Some(p),
            Self::Field(_) => None,
        }
    }
}

impl From<PageProperty> for FieldRef {
    fn from(p: PageProperty) -> Self {
        Self::Property(p)
    }
}

impl Ord for FieldRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.storage_id().cmp(&other.storage_id())
    }
}

impl PartialOrd for FieldRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(id) => write!(f, "field #{id}"),
            Self::Property(p) => write!(f, "property {p}"),
        }
    }
}

/// Locks of one page: target to field/property name.
pub type PageLocks = BTreeMap<FieldRef, String>;

// ---------------------------------------------------------------------------
// FieldKey
// ---------------------------------------------------------------------------

/// Any accepted way of naming a lock target before translation.
///
/// Deserializes from a JSON number (an id or sentinel) or a string (a name,
/// an alias, or a numeric string).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldKey {
    #[serde(skip_deserializing)]
    Ref(FieldRef),
    Id(DbId),
    Name(String),
}

impl FieldKey {
    /// Translate without the field registry.
    ///
    /// `Err(name)` means the key is a plain field name that only the
    /// registry can resolve.
    fn resolve_local(&self) -> Result<Option<FieldRef>, &str> {
        match self {
            Self::Ref(FieldRef::Field(id)) => Ok(FieldRef::field(*id)),
            Self::Ref(r) => Ok(Some(*r)),
            Self::Id(id) => Ok(FieldRef::from_storage_id(*id)),
            Self::Name(name) => {
                if let Some(id) = parse_numeric_id(name) {
                    return Ok(FieldRef::from_storage_id(id));
                }
                if let Some(p) = PageProperty::from_name(name) {
                    return Ok(Some(p.into()));
                }
                if name.is_empty() {
                    return Ok(None);
                }
                Err(name.as_str())
            }
        }
    }
}

impl From<FieldRef> for FieldKey {
    fn from(r: FieldRef) -> Self {
        Self::Ref(r)
    }
}

impl From<PageProperty> for FieldKey {
    fn from(p: PageProperty) -> Self {
        Self::Ref(p.into())
    }
}

impl From<DbId> for FieldKey {
    fn from(id: DbId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref(r) => r.fmt(f),
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// Translate a key into a storable reference.
///
/// Rules, in order:
/// 1. A numeric id or numeric string is decoded as a storage id: a positive
///    value is a field id, a known negative value is a property sentinel.
/// 2. A property name or alias maps to its property.
/// 3. Anything else is looked up by name in the host field registry.
///
/// `Ok(None)` means "no such field or property". Registry failures are
/// returned as errors.
pub async fn resolve_field<R>(key: &FieldKey, registry: &R) -> Result<Option<FieldRef>, CoreError>
where
    R: FieldRegistry + ?Sized,
{
    match key.resolve_local() {
        Ok(resolved) => Ok(resolved),
        Err(name) => Ok(registry
            .field_id_by_name(name)
            .await?
            .and_then(FieldRef::field)),
    }
}

/// Reverse translation: the canonical property name, or the registry's
/// field name (empty when the field no longer exists).
pub async fn field_name<R>(field: FieldRef, registry: &R) -> Result<String, CoreError>
where
    R: FieldRegistry + ?Sized,
{
    match field {
        FieldRef::Property(p) => Ok(p.as_str().to_string()),
        FieldRef::Field(id) => Ok(registry
            .field_by_id(id)
            .await?
            .map(|f| f.name)
            .unwrap_or_default()),
    }
}

/// Parse `"123"` or `"-4"`. Signs other than a leading minus, whitespace and
/// empty digit runs are rejected.
fn parse_numeric_id(s: &str) -> Option<DbId> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
