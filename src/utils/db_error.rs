//! Classification of PostgreSQL unique violations on the `urls` table.

/// Unique constraint on `urls.original`.
pub const ORIGINAL_CONSTRAINT: &str = "urls_original_key";

/// Unique constraint on `urls.shortened`.
pub const SHORTENED_CONSTRAINT: &str = "urls_shortened_key";

/// Which unique constraint rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueViolation {
    Original,
    Shortened,
}

/// Returns the violated `urls` constraint, if `e` is a unique violation on one.
pub fn unique_violation(e: &sqlx::Error) -> Option<UniqueViolation> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    classify_constraint(db_err.constraint())
}

fn classify_constraint(constraint: Option<&str>) -> Option<UniqueViolation> {
    match constraint {
        Some(ORIGINAL_CONSTRAINT) => Some(UniqueViolation::Original),
        Some(SHORTENED_CONSTRAINT) => Some(UniqueViolation::Shortened),
        _ => None,
    }
}
