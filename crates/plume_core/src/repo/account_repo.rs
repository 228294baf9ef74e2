//! Account repository contract and SQLite implementation.
//!
//! # Invariants
//! - Writes call `Account::validate()` first; a rejected record is never
//!   persisted.
//! - Reads reject undecodable rows instead of masking them.

use crate::model::account::{Account, AccountId};
use crate::repo::sqlite_store::{
    bool_to_int, is_primary_key_violation, read_flag, read_uuid, SqliteStore,
};
use crate::repo::{RecordKind, RepoError, RepoResult};
use rusqlite::{params, Row};

const ACCOUNT_SELECT_SQL: &str = "SELECT
    uuid,
    display_name,
    is_privileged,
    is_enabled
FROM accounts";

/// Store capability for account records.
pub trait AccountRepository {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId>;
    fn update_account(&self, account: &Account) -> RepoResult<()>;
    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>>;
    /// All accounts, oldest first.
    fn list_accounts(&self) -> RepoResult<Vec<Account>>;
    /// Existence check: at least one account has `is_privileged = true`.
    fn any_privileged_account(&self) -> RepoResult<bool>;
}

impl<T: AccountRepository + ?Sized> AccountRepository for &T {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId> {
        (**self).create_account(account)
    }

    fn update_account(&self, account: &Account) -> RepoResult<()> {
        (**self).update_account(account)
    }

    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>> {
        (**self).get_account(id)
    }

    fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        (**self).list_accounts()
    }

    fn any_privileged_account(&self) -> RepoResult<bool> {
        (**self).any_privileged_account()
    }
}

impl AccountRepository for SqliteStore<'_> {
    fn create_account(&self, account: &Account) -> RepoResult<AccountId> {
        account.validate()?;

        self.conn
            .execute(
                "INSERT INTO accounts (
                    uuid,
                    display_name,
                    is_privileged,
                    is_enabled
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    account.uuid.to_string(),
                    account.display_name.as_str(),
                    bool_to_int(account.is_privileged),
                    bool_to_int(account.is_enabled),
                ],
            )
            .map_err(|err| {
                if is_primary_key_violation(&err) {
                    RepoError::Duplicate {
                        kind: RecordKind::Account,
                        id: account.uuid,
                    }
                } else {
                    RepoError::from(err)
                }
            })?;

        Ok(account.uuid)
    }

    fn update_account(&self, account: &Account) -> RepoResult<()> {
        account.validate()?;

        let changed = self.conn.execute(
            "UPDATE accounts
             SET
                display_name = ?1,
                is_privileged = ?2,
                is_enabled = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?4;",
            params![
                account.display_name.as_str(),
                bool_to_int(account.is_privileged),
                bool_to_int(account.is_enabled),
                account.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Account,
                id: account.uuid,
            });
        }
        Ok(())
    }

    fn get_account(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_account_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACCOUNT_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut accounts = Vec::new();
        while let Some(row) = rows.next()? {
            accounts.push(parse_account_row(row)?);
        }
        Ok(accounts)
    }

    fn any_privileged_account(&self) -> RepoResult<bool> {
        self.exists("SELECT 1 FROM accounts WHERE is_privileged = 1", [])
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    let account = Account {
        uuid: read_uuid(row, "accounts", "uuid")?,
        display_name: row.get("display_name")?,
        is_privileged: read_flag(row, "accounts", "is_privileged")?,
        is_enabled: read_flag(row, "accounts", "is_enabled")?,
    };
    account.validate().map_err(|err| {
        RepoError::InvalidData(format!("account {} failed validation: {err}", account.uuid))
    })?;
    Ok(account)
}
