//! Rule evaluator over an injected store.
//!
//! # Responsibility
//! - Answer system-wide existence questions (important content, privileged
//!   accounts) against whichever store the caller hands in.
//! - Expose the pure display-name rule alongside them.
//!
//! # Invariants
//! - Existence checks report presence only; no count is ever derived.
//! - The evaluator holds no state besides the borrowed store.

use crate::model::validation::{validate_display_name, ValidationErrors};
use crate::repo::{AccountRepository, ContentRepository, RepoResult};
use log::debug;

/// Stateless predicates evaluated against a borrowed store.
pub struct RuleEvaluator<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S: ?Sized> RuleEvaluator<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// `true` iff at least one content item anywhere is marked important.
    pub fn system_has_important_content(&self) -> RepoResult<bool>
    where
        S: ContentRepository,
    {
        let found = self.store.any_important_content()?;
        debug!("event=rule_eval module=rules rule=important_content_exists result={found}");
        Ok(found)
    }

    /// `true` iff at least one account anywhere is privileged.
    pub fn system_has_privileged_account(&self) -> RepoResult<bool>
    where
        S: AccountRepository,
    {
        let found = self.store.any_privileged_account()?;
        debug!("event=rule_eval module=rules rule=privileged_account_exists result={found}");
        Ok(found)
    }

    /// Same as [`crate::model::validation::validate_display_name`]; never
    /// touches the store.
    pub fn validate_display_name(&self, name: &str) -> ValidationErrors {
        validate_display_name(name)
    }
}
