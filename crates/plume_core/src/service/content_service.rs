//! Content use-case service.
//!
//! # Responsibility
//! - Resolve content owners and derive visibility.
//! - Apply flag/field edits and bulk removal of important content.
//!
//! # Invariants
//! - Visibility is `owner.is_enabled && content.is_published`.
//! - A missing owner is reported as `DanglingReference`, never as hidden.

use crate::model::account::Account;
use crate::model::content::{Content, ContentId};
use crate::repo::{AccountRepository, ContentRepository};
use crate::service::{ServiceError, ServiceResult};
use log::{error, info};

/// Content service facade over a store.
pub struct ContentService<S> {
    store: S,
}

impl<S> ContentService<S>
where
    S: AccountRepository + ContentRepository,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get_content(&self, id: ContentId) -> ServiceResult<Content> {
        self.store
            .get_content(id)?
            .ok_or(ServiceError::ContentNotFound(id))
    }

    /// Loads the owning account of `content`.
    ///
    /// # Errors
    /// - `ServiceError::DanglingReference` when the owner is absent.
    pub fn owner_of(&self, content: &Content) -> ServiceResult<Account> {
        match self.store.get_account(content.owner_uuid)? {
            Some(owner) => Ok(owner),
            None => {
                error!(
                    "event=content_owner module=service status=error error_code=dangling_owner content_id={} owner_id={}",
                    content.uuid, content.owner_uuid
                );
                Err(ServiceError::DanglingReference {
                    content: content.uuid,
                    owner: content.owner_uuid,
                })
            }
        }
    }

    /// Whether accounts other than the owner may see `content`.
    pub fn visibility_of(&self, content: &Content) -> ServiceResult<bool> {
        let owner = self.owner_of(content)?;
        Ok(content.is_visible_with_owner(&owner))
    }

    /// Store-backed form of [`ContentService::visibility_of`].
    pub fn is_visible_to_others(&self, id: ContentId) -> ServiceResult<bool> {
        let content = self.get_content(id)?;
        self.visibility_of(&content)
    }

    /// Persists field assignments made on `content`. The owner must match
    /// the stored owner.
    pub fn update_content(&self, content: &Content) -> ServiceResult<()> {
        self.store.update_content(content)?;
        Ok(())
    }

    pub fn set_published(&self, id: ContentId, is_published: bool) -> ServiceResult<Content> {
        let mut content = self.get_content(id)?;
        content.is_published = is_published;
        self.store.update_content(&content)?;
        info!(
            "event=content_update module=service status=ok content_id={id} published={is_published}"
        );
        Ok(content)
    }

    pub fn set_important(&self, id: ContentId, is_important: bool) -> ServiceResult<Content> {
        let mut content = self.get_content(id)?;
        content.is_important = is_important;
        self.store.update_content(&content)?;
        info!(
            "event=content_update module=service status=ok content_id={id} important={is_important}"
        );
        Ok(content)
    }

    /// Removes every important item in the store. Returns the number removed.
    pub fn purge_important_contents(&self) -> ServiceResult<usize> {
        let removed = self.store.delete_important_contents()?;
        info!("event=content_purge module=service status=ok scope=important removed={removed}");
        Ok(removed)
    }
}
