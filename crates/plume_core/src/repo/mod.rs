//! Repository contracts and store implementations.
//!
//! # Responsibility
//! - Define the store capabilities the core consumes: create, field-level
//!   update, lookup and existence queries.
//! - Keep SQL details behind the `SqliteStore` boundary.
//!
//! # Invariants
//! - Write paths validate records before mutating storage.
//! - Existence queries report only whether a match exists, never a count.
//! - Store failures are returned verbatim inside `RepoError::Db`.

use crate::db::DbError;
use crate::model::account::AccountId;
use crate::model::content::ContentId;
use crate::model::validation::ValidationErrors;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod account_repo;
pub mod content_repo;
pub mod memory_store;
pub mod sqlite_store;

pub use account_repo::AccountRepository;
pub use content_repo::ContentRepository;
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

pub type RepoResult<T> = Result<T, RepoError>;

/// Record family a repository error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Account,
    Content,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::Content => write!(f, "content"),
        }
    }
}

/// Error returned by every repository operation.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed model validation; nothing was written.
    Validation(ValidationErrors),
    /// Underlying store failure.
    Db(DbError),
    NotFound {
        kind: RecordKind,
        id: Uuid,
    },
    /// Insert reused an identifier that is already stored.
    Duplicate {
        kind: RecordKind,
        id: Uuid,
    },
    /// Content insert referenced an account that does not exist.
    MissingOwner(AccountId),
    /// Content update attempted to move the item to another owner.
    OwnerChanged(ContentId),
    /// Persisted row could not be decoded into a model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Duplicate { kind, id } => write!(f, "{kind} already exists: {id}"),
            Self::MissingOwner(id) => write!(f, "owner account does not exist: {id}"),
            Self::OwnerChanged(id) => write!(f, "content owner is immutable: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for RepoError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
