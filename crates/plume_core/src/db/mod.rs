//! Connection setup and schema versioning for the bundled SQLite store.
//!
//! Everything that can go wrong below the repository layer ends up as a
//! [`DbError`]. Repositories wrap it in `RepoError::Db` and services report
//! it as `ServiceError::Persistence` without inspecting it further.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure reported by the SQLite layer itself.
#[derive(Debug)]
pub enum DbError {
    /// The file carries accounts/contents tables from a newer plume build.
    /// Opening it would risk writing rows the newer schema does not expect.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Any error raised by rusqlite (I/O, locking, constraint, SQL).
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Whether the failure came from the schema version guard rather than
    /// from SQLite.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::UnsupportedSchemaVersion { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema v{db_version} was written by a newer build (this build knows up to v{latest_supported})"
            ),
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite(err)
    }
}
