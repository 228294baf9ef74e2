//! In-process store implementing both repository contracts.
//!
//! Mirrors the SQLite store's rules (validation before write, owner must
//! exist, owner immutable) over plain vectors. Intended for tests and
//! embedders that do not need durability.

use crate::model::account::{Account, AccountId};
use crate::model::content::{Content, ContentId};
use crate::repo::{AccountRepository, ContentRepository, RecordKind, RepoError, RepoResult};
use std::cell::RefCell;

/// Insertion-ordered, single-threaded store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RefCell<Vec<Account>>,
    contents: RefCell<Vec<Content>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn has_account(&self, id: AccountId) -> bool {
        self.accounts.borrow().iter().any(|account| account.uuid == id)
    }
}

impl AccountRepository for MemoryStore {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId> {
        account.validate()?;
        if self.has_account(account.uuid) {
            return Err(RepoError::Duplicate {
                kind: RecordKind::Account,
                id: account.uuid,
            });
        }
        self.accounts.borrow_mut().push(account.clone());
        Ok(account.uuid)
    }

    fn update_account(&self, account: &Account) -> RepoResult<()> {
        account.validate()?;
        let mut accounts = self.accounts.borrow_mut();
        let slot = accounts
            .iter_mut()
            .find(|existing| existing.uuid == account.uuid)
            .ok_or(RepoError::NotFound {
                kind: RecordKind::Account,
                id: account.uuid,
            })?;
        *slot = account.clone();
        Ok(())
    }

    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>> {
        Ok(self
            .accounts
            .borrow()
            .iter()
            .find(|account| account.uuid == id)
            .cloned())
    }

    fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        Ok(self.accounts.borrow().clone())
    }

    fn any_privileged_account(&self) -> RepoResult<bool> {
        Ok(self
            .accounts
            .borrow()
            .iter()
            .any(|account| account.is_privileged))
    }
}

impl ContentRepository for MemoryStore {
    fn create_content(&self, content: &Content) -> RepoResult<ContentId> {
        content.validate()?;
        if !self.has_account(content.owner_uuid) {
            return Err(RepoError::MissingOwner(content.owner_uuid));
        }
        let mut contents = self.contents.borrow_mut();
        if contents.iter().any(|existing| existing.uuid == content.uuid) {
            return Err(RepoError::Duplicate {
                kind: RecordKind::Content,
                id: content.uuid,
            });
        }
        contents.push(content.clone());
        Ok(content.uuid)
    }

    fn update_content(&self, content: &Content) -> RepoResult<()> {
        content.validate()?;
        let mut contents = self.contents.borrow_mut();
        let slot = contents
            .iter_mut()
            .find(|existing| existing.uuid == content.uuid)
            .ok_or(RepoError::NotFound {
                kind: RecordKind::Content,
                id: content.uuid,
            })?;
        if slot.owner_uuid != content.owner_uuid {
            return Err(RepoError::OwnerChanged(content.uuid));
        }
        *slot = content.clone();
        Ok(())
    }

    fn get_content(&self, id: ContentId) -> RepoResult<Option<Content>> {
        Ok(self
            .contents
            .borrow()
            .iter()
            .find(|content| content.uuid == id)
            .cloned())
    }

    fn list_contents_by_owner(&self, owner: AccountId) -> RepoResult<Vec<Content>> {
        Ok(self
            .contents
            .borrow()
            .iter()
            .filter(|content| content.owner_uuid == owner)
            .cloned()
            .collect())
    }

    fn count_contents_by_owner(&self, owner: AccountId) -> RepoResult<u64> {
        let count = self
            .contents
            .borrow()
            .iter()
            .filter(|content| content.owner_uuid == owner)
            .count();
        Ok(count as u64)
    }

    fn any_important_content(&self) -> RepoResult<bool> {
        Ok(self
            .contents
            .borrow()
            .iter()
            .any(|content| content.is_important))
    }

    fn delete_important_contents(&self) -> RepoResult<usize> {
        let mut contents = self.contents.borrow_mut();
        let before = contents.len();
        contents.retain(|content| !content.is_important);
        Ok(before - contents.len())
    }
}
