/// Page and field identifiers are PostgreSQL BIGINT.
pub type DbId = i64;

/// Reserved per-lock attribute. Written as zero, read back verbatim.
pub type LockFlags = i32;
