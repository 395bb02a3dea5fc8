//! Database ID type definition.

/// Alias for the integer type used for database row IDs (tags, tag sets, and
/// host entities).
pub type DatabaseID = i64;
