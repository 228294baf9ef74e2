//! Account use-case service.
//!
//! # Responsibility
//! - Register and update accounts behind the display-name rule.
//! - Author content on behalf of an account.
//! - Answer privilege and importance questions for account callers.
//!
//! # Invariants
//! - A rejected registration writes nothing.
//! - `has_important_content_anywhere` is system-wide, not owner-scoped.

use crate::model::account::{Account, AccountId};
use crate::model::content::Content;
use crate::model::validation::validate_display_name;
use crate::repo::{AccountRepository, ContentRepository};
use crate::service::rules::RuleEvaluator;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

/// Input for [`AccountService::register_account`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub display_name: String,
    pub is_privileged: bool,
    pub is_enabled: bool,
}

impl NewAccount {
    /// Unprivileged, enabled account request.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            is_privileged: false,
            is_enabled: true,
        }
    }

    pub fn privileged(mut self, is_privileged: bool) -> Self {
        self.is_privileged = is_privileged;
        self
    }

    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }
}

/// Account service facade over a store.
pub struct AccountService<S> {
    store: S,
}

impl<S> AccountService<S>
where
    S: AccountRepository + ContentRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Rule evaluator bound to this service's store.
    pub fn rules(&self) -> RuleEvaluator<'_, S> {
        RuleEvaluator::new(&self.store)
    }

    /// Validates and persists a new account, returning the stored record.
    ///
    /// # Errors
    /// - `ServiceError::Validation` with a `displayName` entry for the
    ///   reserved name. The store is not touched in that case.
    /// - `ServiceError::Persistence` for store failures.
    pub fn register_account(&self, request: &NewAccount) -> ServiceResult<Account> {
        let name_check = validate_display_name(&request.display_name);
        if !name_check.is_valid() {
            warn!("event=account_register module=service status=rejected field=displayName");
            return Err(ServiceError::Validation(name_check));
        }

        let mut account = Account::new(request.display_name.clone());
        account.is_privileged = request.is_privileged;
        account.is_enabled = request.is_enabled;

        let account_id = self.store.create_account(&account)?;
        info!(
            "event=account_register module=service status=ok account_id={account_id} privileged={}",
            account.is_privileged
        );

        self.store
            .get_account(account_id)?
            .ok_or(ServiceError::InconsistentState(
                "registered account not found in read-back",
            ))
    }

    pub fn get_account(&self, id: AccountId) -> ServiceResult<Account> {
        self.store
            .get_account(id)?
            .ok_or(ServiceError::AccountNotFound(id))
    }

    pub fn list_accounts(&self) -> ServiceResult<Vec<Account>> {
        Ok(self.store.list_accounts()?)
    }

    /// Persists field assignments made on `account`.
    pub fn update_account(&self, account: &Account) -> ServiceResult<()> {
        self.store.update_account(account)?;
        info!(
            "event=account_update module=service status=ok account_id={}",
            account.uuid
        );
        Ok(())
    }

    /// Whether the account may remove other accounts' content.
    pub fn can_delete_others_content(&self, id: AccountId) -> ServiceResult<bool> {
        Ok(self.get_account(id)?.can_delete_others_content())
    }

    /// Creates default-valued content owned by `owner`.
    ///
    /// The owner's collection grows by exactly one on success.
    pub fn author_content(&self, owner: AccountId) -> ServiceResult<Content> {
        let account = self.get_account(owner)?;
        let content = Content::new(account.uuid);
        let content_id = self.store.create_content(&content)?;
        info!(
            "event=content_author module=service status=ok account_id={} content_id={content_id}",
            account.uuid
        );

        self.store
            .get_content(content_id)?
            .ok_or(ServiceError::InconsistentState(
                "authored content not found in read-back",
            ))
    }

    /// Content owned by the account, oldest first.
    pub fn owned_contents(&self, owner: AccountId) -> ServiceResult<Vec<Content>> {
        self.get_account(owner)?;
        Ok(self.store.list_contents_by_owner(owner)?)
    }

    pub fn owned_content_count(&self, owner: AccountId) -> ServiceResult<u64> {
        self.get_account(owner)?;
        Ok(self.store.count_contents_by_owner(owner)?)
    }

    /// Whether important content exists anywhere in the store.
    ///
    /// Deliberately not limited to a single account's content.
    pub fn has_important_content_anywhere(&self) -> ServiceResult<bool> {
        Ok(self.rules().system_has_important_content()?)
    }
}
