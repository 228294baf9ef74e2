//! Use-case services over repository contracts.
//!
//! # Responsibility
//! - Orchestrate repository calls into account/content use-cases.
//! - Translate repository failures into caller-facing service errors.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Services stay storage-agnostic; any `AccountRepository +
//!   ContentRepository` works.

use crate::model::account::AccountId;
use crate::model::content::ContentId;
use crate::model::validation::ValidationErrors;
use crate::repo::{RecordKind, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_service;
pub mod content_service;
pub mod rules;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for account and content use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed field validation; nothing was written.
    Validation(ValidationErrors),
    AccountNotFound(AccountId),
    ContentNotFound(ContentId),
    /// Content references an owner the store cannot load. Signals a broken
    /// store invariant, not a recoverable condition.
    DanglingReference {
        content: ContentId,
        owner: AccountId,
    },
    /// Store failure, passed through unchanged.
    Persistence(RepoError),
    /// Write succeeded but read-back disagreed.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::AccountNotFound(id) => write!(f, "account not found: {id}"),
            Self::ContentNotFound(id) => write!(f, "content not found: {id}"),
            Self::DanglingReference { content, owner } => write!(
                f,
                "content {content} references missing owner account {owner}"
            ),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(errors) => Self::Validation(errors),
            RepoError::NotFound {
                kind: RecordKind::Account,
                id,
            } => Self::AccountNotFound(id),
            RepoError::NotFound {
                kind: RecordKind::Content,
                id,
            } => Self::ContentNotFound(id),
            other => Self::Persistence(other),
        }
    }
}
