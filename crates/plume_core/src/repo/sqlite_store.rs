//! SQLite-backed store implementing both repository contracts.
//!
//! # Invariants
//! - The borrowed connection has been opened through `crate::db`, so
//!   migrations are applied and foreign keys are enforced.
//! - Boolean flags are stored as `0`/`1`; anything else is `InvalidData`.

use crate::repo::{RepoError, RepoResult};
use rusqlite::{Connection, ErrorCode, Params, Row};
use uuid::Uuid;

/// Store over one borrowed SQLite connection.
pub struct SqliteStore<'conn> {
    pub(crate) conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Runs `SELECT EXISTS(<subquery>)` and decodes the flag.
    pub(crate) fn exists<P: Params>(&self, subquery: &str, params: P) -> RepoResult<bool> {
        let found: i64 = self.conn.query_row(
            &format!("SELECT EXISTS({subquery});"),
            params,
            |row| row.get(0),
        )?;
        Ok(found == 1)
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn read_uuid(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

pub(crate) fn read_flag(row: &Row<'_>, table: &str, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {table}.{column}"
        ))),
    }
}

/// Returns `true` for a foreign-key constraint failure.
pub(crate) fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    has_constraint_code(err, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

/// Returns `true` when an insert collided with an existing `uuid` key.
///
/// `uuid` is the only unique column, so a unique-index failure counts too.
pub(crate) fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    has_constraint_code(err, rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        || has_constraint_code(err, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
}

fn has_constraint_code(err: &rusqlite::Error, extended_code: std::os::raw::c_int) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == extended_code
    )
}
