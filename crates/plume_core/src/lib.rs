//! Core domain logic for plume: accounts, the content they own, and the
//! rules deciding who may see or remove what.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::account::{Account, AccountId};
pub use model::content::{Content, ContentId};
pub use model::validation::{
    validate_display_name, FieldError, ValidationErrors, DISPLAY_NAME_FIELD,
    RESERVED_DISPLAY_NAME,
};
pub use repo::{
    AccountRepository, ContentRepository, MemoryStore, RecordKind, RepoError, RepoResult,
    SqliteStore,
};
pub use service::account_service::{AccountService, NewAccount};
pub use service::content_service::ContentService;
pub use service::rules::RuleEvaluator;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
