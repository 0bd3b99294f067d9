//! Database error classification helpers.

/// Name of the unique constraint PostgreSQL creates for `url.alias`.
pub const ALIAS_UNIQUE_CONSTRAINT: &str = "url_alias_key";

/// Returns true if `e` is a unique violation on the alias column.
///
/// A violation without a reported constraint name is also treated as an
/// alias conflict, since `url.alias` is the only unique column besides the
/// generated primary key.
pub fn is_unique_violation_on_alias(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(ALIAS_UNIQUE_CONSTRAINT) | None)
}
